mod executor;
mod default_executor;
mod spawn;
#[cfg(test)]
pub(crate) mod tests;

pub use executor::{Executor, ProcessResult};
pub use default_executor::DefaultExecutor;
pub use spawn::{EXIT_NOT_EXECUTABLE, EXIT_NOT_FOUND, EXIT_REDIRECT_FAILED};

use crate::ast::CommandSpec;
use crate::error::SpawnError;

/// Run one command as a child process and wait for it.
pub fn run(cmd: &CommandSpec) -> Result<ProcessResult, SpawnError> {
    DefaultExecutor.run(cmd)
}

/// Run `left | right` as two child processes and wait for both.
pub fn run_piped(
    left: &CommandSpec,
    right: &CommandSpec,
) -> Result<(ProcessResult, ProcessResult), SpawnError> {
    DefaultExecutor.run_piped(left, right)
}
