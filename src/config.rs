use std::env;
use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::{ Path, PathBuf };
use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".tinyshrc";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `{cwd}` is replaced with the current directory.
    pub prompt: String,
    pub banner: bool,
    pub report_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "tinysh:{cwd}> ".to_string(),
            banner: true,
            report_status: false,
        }
    }

    /// `$HOME/.tinyshrc`, when `HOME` is set.
    pub fn default_path() -> Option<PathBuf> {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            src.push_str(&line?);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno + 1, line)));
            };

            // The prompt keeps its surrounding whitespace.
            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "banner" => config.banner = parse_bool(value, lineno, line)?,
                "report_status" => config.report_status = parse_bool(value, lineno, line)?,
                k => return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno + 1, k))),
            }
        }

        Ok(config)
    }
}

fn parse_bool(value: &str, lineno: usize, line: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Parse(format!("Line {}: Invalid bool: {}", lineno + 1, line))),
    }
}
