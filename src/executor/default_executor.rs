use std::os::fd::AsRawFd;
use log::{debug, warn};
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::unistd::{pipe2, Pid};
use crate::ast::CommandSpec;
use crate::error::SpawnError;
use crate::executor::{ Executor, ProcessResult };
use super::spawn::{spawn, wait, PreparedCommand, Wiring};

/// Runs commands as real child processes.
pub struct DefaultExecutor;

impl Executor for DefaultExecutor {
    fn run(&mut self, cmd: &CommandSpec) -> Result<ProcessResult, SpawnError> {
        let prepared = PreparedCommand::new(cmd)?;
        let pid = spawn(&prepared, Wiring::default()).map_err(SpawnError::Fork)?;
        debug!("spawned '{}' as pid {}", cmd.program, pid);

        let result = wait(pid).map_err(SpawnError::Wait)?;
        debug!("pid {} {}", pid, result);
        Ok(result)
    }

    fn run_piped(
        &mut self,
        left: &CommandSpec,
        right: &CommandSpec,
    ) -> Result<(ProcessResult, ProcessResult), SpawnError> {
        run_piped_with(left, right, spawn, wait)
    }
}

/// Pipeline body with the fork and reap steps supplied by the caller.
fn run_piped_with<S, W>(
    left: &CommandSpec,
    right: &CommandSpec,
    mut spawn_fn: S,
    mut wait_fn: W,
) -> Result<(ProcessResult, ProcessResult), SpawnError>
where
    S: FnMut(&PreparedCommand, Wiring) -> Result<Pid, Errno>,
    W: FnMut(Pid) -> Result<ProcessResult, Errno>,
{
    let left_cmd = PreparedCommand::new(left)?;
    let right_cmd = PreparedCommand::new(right)?;

    // Close-on-exec keeps these handles out of children spawned elsewhere;
    // our own children close them explicitly after binding.
    let (read_end, write_end) = pipe2(OFlag::O_CLOEXEC).map_err(SpawnError::Pipe)?;
    let inherited = [Some(read_end.as_raw_fd()), Some(write_end.as_raw_fd())];

    let left_pid = spawn_fn(
        &left_cmd,
        Wiring {
            stdin: None,
            stdout: Some(write_end.as_raw_fd()),
            inherited,
        },
    )
    .map_err(SpawnError::Fork)?;
    debug!("spawned '{}' as pid {} (pipe writer)", left.program, left_pid);

    let right_spawn = spawn_fn(
        &right_cmd,
        Wiring {
            stdin: Some(read_end.as_raw_fd()),
            stdout: None,
            inherited,
        },
    );

    // The reader only sees EOF once every write handle is gone, ours included.
    drop(read_end);
    drop(write_end);

    let right_pid = match right_spawn {
        Ok(pid) => pid,
        Err(errno) => {
            warn!("fork failed for '{}': {}; reaping pid {}", right.program, errno, left_pid);
            let left_result = wait_fn(left_pid).map_err(SpawnError::Wait)?;
            return Err(SpawnError::PartialPipeline {
                left: left_result,
                source: errno,
            });
        }
    };
    debug!("spawned '{}' as pid {} (pipe reader)", right.program, right_pid);

    // Both children are reaped before either failure is reported.
    let left_result = wait_fn(left_pid);
    let right_result = wait_fn(right_pid);
    if let Err(errno) = left_result {
        warn!("wait for pid {} failed: {}", left_pid, errno);
    }
    if let Err(errno) = right_result {
        warn!("wait for pid {} failed: {}", right_pid, errno);
    }
    let left_result = left_result.map_err(SpawnError::Wait)?;
    let right_result = right_result.map_err(SpawnError::Wait)?;
    debug!("pid {} {}, pid {} {}", left_pid, left_result, right_pid, right_result);

    Ok((left_result, right_result))
}
