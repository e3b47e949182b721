use crate::ast::CommandSpec;
use crate::error::SpawnError;
use crate::executor::{Executor, ProcessResult};

/// Records what it was asked to run instead of spawning anything.
pub struct RecordingExecutor {
    pub log: Vec<String>,
    pub status: ProcessResult,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self { log: vec![], status: ProcessResult::exited(0) }
    }

    pub fn with_status(status: ProcessResult) -> Self {
        Self { log: vec![], status }
    }
}

fn describe(cmd: &CommandSpec) -> String {
    let mut text = format!("{} {:?}", cmd.program, cmd.args);
    if let Some(input) = &cmd.input {
        text.push_str(&format!(" < {}", input));
    }
    if let Some(output) = &cmd.output {
        text.push_str(&format!(" > {}", output));
    }
    text
}

impl Executor for RecordingExecutor {
    fn run(&mut self, cmd: &CommandSpec) -> Result<ProcessResult, SpawnError> {
        if cmd.is_empty() {
            return Err(SpawnError::EmptyCommand);
        }
        self.log.push(format!("run: {}", describe(cmd)));
        Ok(self.status)
    }

    fn run_piped(
        &mut self,
        left: &CommandSpec,
        right: &CommandSpec,
    ) -> Result<(ProcessResult, ProcessResult), SpawnError> {
        if left.is_empty() || right.is_empty() {
            return Err(SpawnError::EmptyCommand);
        }
        self.log.push(format!("run_piped: {} | {}", describe(left), describe(right)));
        Ok((self.status, self.status))
    }
}
