use std::fmt;
use crate::ast::{CommandSpec, PipelineRequest};
use crate::error::SpawnError;

/// How one child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: Option<i32>,
    pub signaled: bool,
    pub signal: Option<i32>,
}

impl ProcessResult {
    pub fn exited(code: i32) -> Self {
        ProcessResult {
            exit_code: Some(code),
            signaled: false,
            signal: None,
        }
    }

    pub fn killed(signal: i32) -> Self {
        ProcessResult {
            exit_code: None,
            signaled: true,
            signal: Some(signal),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl fmt::Display for ProcessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.exit_code, self.signal) {
            (Some(code), _) => write!(f, "exited with status {}", code),
            (None, Some(signal)) => write!(f, "killed by signal {}", signal),
            (None, None) => write!(f, "terminated"),
        }
    }
}

pub trait Executor {
    /// Spawn one command and block until it terminates.
    fn run(&mut self, cmd: &CommandSpec) -> Result<ProcessResult, SpawnError>;

    /// Spawn `left | right` and block until both terminate.
    fn run_piped(
        &mut self,
        left: &CommandSpec,
        right: &CommandSpec,
    ) -> Result<(ProcessResult, ProcessResult), SpawnError>;

    fn execute(&mut self, request: &PipelineRequest) -> Result<Vec<ProcessResult>, SpawnError> {
        match request {
            PipelineRequest::Single(cmd) => Ok(vec![self.run(cmd)?]),
            PipelineRequest::Piped(left, right) => {
                let (left, right) = self.run_piped(left, right)?;
                Ok(vec![left, right])
            }
        }
    }
}
