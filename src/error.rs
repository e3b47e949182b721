use std::io;
use nix::errno::Errno;
use thiserror::Error;
use crate::ast::RedirectKind;
use crate::executor::ProcessResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("syntax error: expected file after {0}")]
    MissingRedirectTarget(RedirectKind),
    #[error("syntax error: expected file after {operator}, found '{found}'")]
    UnexpectedOperator {
        operator: RedirectKind,
        found: String,
    },
}

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("empty command")]
    EmptyCommand,
    #[error("invalid argument (contains NUL byte): {0:?}")]
    InvalidArgument(String),
    #[error("pipe failed: {0}")]
    Pipe(#[source] Errno),
    #[error("fork failed: {0}")]
    Fork(#[source] Errno),
    #[error("wait failed: {0}")]
    Wait(#[source] Errno),
    #[error("pipeline partially spawned, left side {left}: fork failed: {source}")]
    PartialPipeline {
        left: ProcessResult,
        #[source]
        source: Errno,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("{0}: missing argument")]
    MissingArgument(&'static str),
    #[error("{command}: {arg}: invalid argument")]
    InvalidArgument {
        command: &'static str,
        arg: String,
    },
    #[error("cd: {dir}: {source}")]
    ChangeDir {
        dir: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("unknown builtin command: {0}")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error(transparent)]
    Builtin(#[from] BuiltinError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
