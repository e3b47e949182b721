use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use argh::FromArgs;
use log::debug;
use tiny_pipe_sh::config::{Config, ConfigLoader};
use tiny_pipe_sh::error::ConfigError;
use tiny_pipe_sh::executor::DefaultExecutor;
use tiny_pipe_sh::repl::Repl;

#[derive(FromArgs)]
/// A tiny interactive shell with redirection and two-stage pipelines.
struct Args {
    /// config file to load instead of ~/.tinyshrc
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// do not print the welcome banner and goodbye line
    #[argh(switch, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tinysh: config: {}", e);
            return ExitCode::from(1);
        }
    };
    debug!("config: {:?}", config);

    let mut repl = Repl::new(config, DefaultExecutor).quiet(args.quiet);
    match repl.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("tinysh: {}", e);
            ExitCode::from(1)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return ConfigLoader::load_from_file(path);
    }
    match ConfigLoader::default_path() {
        Some(path) if path.is_file() => ConfigLoader::load_from_file(path),
        _ => Ok(ConfigLoader::default_config()),
    }
}
