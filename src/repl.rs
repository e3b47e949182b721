use std::io::{self, BufRead, Write};
use log::{debug, trace};
use crate::ast::PipelineRequest;
use crate::builtins::{is_builtin_command, run_builtin_spec, BuiltinStatus};
use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{Executor, ProcessResult};
use crate::parser;
use crate::prompt::ShellPrompt;

const BANNER: &str = "\
*******************************************
*           Welcome to tinysh             *
*      Type 'exit' to leave the shell     *
*******************************************";

/// What a dispatched line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Empty,
    Builtin(BuiltinStatus),
    Ran(Vec<ProcessResult>),
}

pub struct Repl<E: Executor> {
    config: Config,
    prompt: ShellPrompt,
    executor: E,
    quiet: bool,
}

impl<E: Executor> Repl<E> {
    pub fn new(config: Config, executor: E) -> Self {
        let prompt = ShellPrompt::new(config.prompt.clone());
        Repl {
            config,
            prompt,
            executor,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Read and run lines until end of input or `exit`. Returns the exit code.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<i32> {
        if self.config.banner && !self.quiet {
            writeln!(out, "{}", BANNER)?;
        }

        let mut code = 0;
        loop {
            self.prompt.show_prompt(&mut out)?;
            let Some(line) = self.prompt.read_line(&mut input)? else {
                // End with EOF (e.g. Ctrl+D)
                writeln!(out)?;
                break;
            };
            match self.dispatch(&line, &mut out) {
                Ok(Dispatch::Builtin(BuiltinStatus::Exit(status))) => {
                    code = status;
                    break;
                }
                Ok(_) => continue,
                Err(e) => eprintln!("tinysh: {}", e),
            }
        }

        if !self.quiet {
            writeln!(out, "Goodbye!")?;
        }
        out.flush()?;
        Ok(code)
    }

    /// Parse one line and run it: a builtin, a single command or a pipeline.
    pub fn dispatch<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Dispatch, ShellError> {
        let request = parser::build(line)?;
        trace!("parsed {:?}", request);

        if let PipelineRequest::Single(cmd) = &request {
            if cmd.is_empty() {
                return Ok(Dispatch::Empty);
            }
            if is_builtin_command(&cmd.program) {
                debug!("builtin '{}'", cmd.program);
                let status = run_builtin_spec(cmd, out)?;
                return Ok(Dispatch::Builtin(status));
            }
        }

        let results = self.executor.execute(&request)?;
        if self.config.report_status {
            for (cmd, result) in request.commands().into_iter().zip(&results) {
                if !result.success() {
                    eprintln!("tinysh: {}: {}", cmd.program, result);
                }
            }
        }
        Ok(Dispatch::Ran(results))
    }
}
