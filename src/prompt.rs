use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use log::warn;

pub struct ShellPrompt {
    template: String,
}

impl ShellPrompt {
    pub fn new(template: impl Into<String>) -> Self {
        ShellPrompt {
            template: template.into(),
        }
    }

    pub fn render(&self) -> String {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("?"));
        self.template.replace("{cwd}", &cwd.display().to_string())
    }

    pub fn show_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.render())?;
        out.flush()
    }

    /// Read one line into a fresh buffer. `None` at end of input.
    /// Invalid UTF-8 is replaced with U+FFFD instead of failing the read.
    pub fn read_line<R: BufRead>(&self, input: &mut R) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let bytes_read = input.read_until(b'\n', &mut buf)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(err) => {
                warn!("input line is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }
}
