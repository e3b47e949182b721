use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use crate::ast::CommandSpec;
use crate::error::BuiltinError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinStatus {
	Continue,
	Exit(i32),
}

pub fn is_builtin_command(cmd: &str) -> bool {
	matches!(cmd, "cd" | "help" | "exit")
}

/// Run a builtin with its redirections applied in-process. Builtins never
/// read stdin, so an input file is only opened to report a missing one.
pub fn run_builtin_spec<W: Write>(cmd: &CommandSpec, out: &mut W) -> Result<BuiltinStatus, BuiltinError> {
	let args = cmd.args.get(1..).unwrap_or(&[]);
	if let Some(path) = &cmd.input {
		File::open(path).map_err(|source| redirect_error(path, source))?;
	}
	match &cmd.output {
		Some(path) => {
			let mut file = OpenOptions::new()
				.write(true)
				.create(true)
				.truncate(true)
				.mode(0o644)
				.open(path)
				.map_err(|source| redirect_error(path, source))?;
			run_builtin_command(&cmd.program, args, &mut file)
		}
		None => run_builtin_command(&cmd.program, args, out),
	}
}

fn redirect_error(path: &str, source: std::io::Error) -> BuiltinError {
	BuiltinError::Redirect {
		path: path.to_string(),
		source,
	}
}

/// Run a builtin. `args` excludes the command name itself.
pub fn run_builtin_command<W: Write>(
	cmd: &str,
	args: &[String],
	out: &mut W,
) -> Result<BuiltinStatus, BuiltinError> {
	match cmd {
		"cd" => {
			let Some(target) = args.first() else {
				return Err(BuiltinError::MissingArgument("cd"));
			};
			env::set_current_dir(target).map_err(|source| BuiltinError::ChangeDir {
				dir: target.clone(),
				source,
			})?;
			Ok(BuiltinStatus::Continue)
		}
		"help" => {
			let _ = writeln!(out, "Available built-in commands:");
			let _ = writeln!(out, "  cd DIR     : Change directory");
			let _ = writeln!(out, "  exit [N]   : Exit shell");
			let _ = writeln!(out, "  help       : Show this help");
			let _ = writeln!(out, "Anything else runs as a program: CMD [ARGS] [< IN] [> OUT] [| CMD ...]");
			Ok(BuiltinStatus::Continue)
		}
		"exit" => match args.first() {
			None => Ok(BuiltinStatus::Exit(0)),
			Some(code) => code
				.parse()
				.map(BuiltinStatus::Exit)
				.map_err(|_| BuiltinError::InvalidArgument {
					command: "exit",
					arg: code.clone(),
				}),
		},
		_ => Err(BuiltinError::Unknown(cmd.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(list: &[&str]) -> Vec<String> {
		list.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_is_builtin() {
		assert!(is_builtin_command("cd"));
		assert!(is_builtin_command("exit"));
		assert!(is_builtin_command("help"));
		assert!(!is_builtin_command("ls"));
	}

	#[test]
	fn test_cd_without_argument() {
		let mut out: Vec<u8> = Vec::new();
		let err = run_builtin_command("cd", &[], &mut out).unwrap_err();
		assert_eq!(err.to_string(), "cd: missing argument");
	}

	#[test]
	fn test_cd_to_missing_dir() {
		let mut out: Vec<u8> = Vec::new();
		let err = run_builtin_command("cd", &args(&["/tinysh/no/such/dir"]), &mut out).unwrap_err();
		assert!(matches!(err, BuiltinError::ChangeDir { ref dir, .. } if dir == "/tinysh/no/such/dir"));
	}

	#[test]
	fn test_exit_codes() {
		let mut out: Vec<u8> = Vec::new();
		assert_eq!(run_builtin_command("exit", &[], &mut out).unwrap(), BuiltinStatus::Exit(0));
		assert_eq!(run_builtin_command("exit", &args(&["3"]), &mut out).unwrap(), BuiltinStatus::Exit(3));
		assert!(run_builtin_command("exit", &args(&["x"]), &mut out).is_err());
	}

	#[test]
	fn test_help_output_redirect() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("help.txt");
		let cmd = CommandSpec::new(args(&["help"])).with_output(path.to_string_lossy());
		let mut out: Vec<u8> = Vec::new();

		assert_eq!(run_builtin_spec(&cmd, &mut out).unwrap(), BuiltinStatus::Continue);
		assert!(out.is_empty());
		assert!(std::fs::read_to_string(&path).unwrap().contains("Available built-in commands"));
	}

	#[test]
	fn test_missing_input_redirect() {
		let cmd = CommandSpec::new(args(&["help"])).with_input("/tinysh/no/such/file");
		let mut out: Vec<u8> = Vec::new();
		let err = run_builtin_spec(&cmd, &mut out).unwrap_err();
		assert!(matches!(err, BuiltinError::Redirect { ref path, .. } if path == "/tinysh/no/such/file"));
		assert!(out.is_empty());
	}

	#[test]
	fn test_help_lists_builtins() {
		let mut out: Vec<u8> = Vec::new();
		run_builtin_command("help", &[], &mut out).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.contains("cd DIR"));
		assert!(text.contains("exit"));
	}
}
