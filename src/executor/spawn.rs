//! Fork/exec with standard-stream wiring.
//!
//! Everything the child needs is converted to C strings before `fork`, so the
//! child side only calls async-signal-safe functions until `execvp` or
//! `_exit`.

use std::ffi::{CStr, CString};
use std::os::fd::RawFd;
use std::ptr;
use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup2, fork, ForkResult, Pid};
use crate::ast::CommandSpec;
use crate::error::SpawnError;
use super::executor::ProcessResult;

pub const EXIT_REDIRECT_FAILED: i32 = 1;
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
pub const EXIT_NOT_FOUND: i32 = 127;

const OUTPUT_MODE: libc::c_uint = 0o644;

pub struct PreparedCommand {
    program: CString,
    argv: Vec<CString>,
    /// NULL-terminated pointers into `argv`, handed to `execvp` as is.
    argv_ptrs: Vec<*const libc::c_char>,
    input: Option<CString>,
    output: Option<CString>,
}

impl PreparedCommand {
    pub fn new(cmd: &CommandSpec) -> Result<Self, SpawnError> {
        if cmd.is_empty() {
            return Err(SpawnError::EmptyCommand);
        }
        let program = c_string(&cmd.program)?;
        let mut argv = cmd
            .args
            .iter()
            .map(|arg| c_string(arg))
            .collect::<Result<Vec<_>, _>>()?;
        if argv.is_empty() {
            argv.push(program.clone());
        }
        // The pointers target each CString's heap buffer, which stays put
        // when `argv` itself is moved.
        let argv_ptrs = argv
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();
        Ok(PreparedCommand {
            program,
            argv,
            argv_ptrs,
            input: cmd.input.as_deref().map(c_string).transpose()?,
            output: cmd.output.as_deref().map(c_string).transpose()?,
        })
    }
}

fn c_string(s: &str) -> Result<CString, SpawnError> {
    CString::new(s).map_err(|_| SpawnError::InvalidArgument(s.to_string()))
}

/// Descriptors a child binds onto its standard streams before exec.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wiring {
    pub stdin: Option<RawFd>,
    pub stdout: Option<RawFd>,
    /// Pipe handles the child inherits and must close before exec.
    pub inherited: [Option<RawFd>; 2],
}

impl Wiring {
    /// Whether `fd` is a standard stream this wiring binds. After binding,
    /// such a descriptor number holds the bound stream even if it was also
    /// one of the inherited handles.
    pub fn binds(&self, fd: RawFd) -> bool {
        (fd == libc::STDIN_FILENO && self.stdin.is_some())
            || (fd == libc::STDOUT_FILENO && self.stdout.is_some())
    }
}

/// Fork a child that applies `wiring`, then the file redirections, then
/// replaces itself with the program. Returns the child's pid in the parent.
pub fn spawn(cmd: &PreparedCommand, wiring: Wiring) -> Result<Pid, Errno> {
    // SAFETY: the child branch never returns, does not allocate and sticks to
    // async-signal-safe calls (signal, fcntl, dup2, close, open, write,
    // execvp, _exit).
    match unsafe { fork() }? {
        ForkResult::Parent { child } => Ok(child),
        ForkResult::Child => exec_child(cmd, wiring),
    }
}

fn exec_child(cmd: &PreparedCommand, wiring: Wiring) -> ! {
    // The interpreter ignores SIGPIPE; programs expect the default action.
    let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };

    if let Some(fd) = wiring.stdin {
        bind_or_exit(fd, libc::STDIN_FILENO);
    }
    if let Some(fd) = wiring.stdout {
        bind_or_exit(fd, libc::STDOUT_FILENO);
    }
    for fd in wiring.inherited.into_iter().flatten() {
        if !wiring.binds(fd) {
            let _ = close(fd);
        }
    }

    if let Some(path) = &cmd.input {
        if let Err(errno) = redirect(path, libc::O_RDONLY, libc::STDIN_FILENO) {
            report(path, errno);
            exit_now(EXIT_REDIRECT_FAILED);
        }
    }
    if let Some(path) = &cmd.output {
        let flags = libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC;
        if let Err(errno) = redirect(path, flags, libc::STDOUT_FILENO) {
            report(path, errno);
            exit_now(EXIT_REDIRECT_FAILED);
        }
    }

    // SAFETY: `argv_ptrs` is NULL-terminated and points into `cmd.argv`.
    unsafe { libc::execvp(cmd.program.as_ptr(), cmd.argv_ptrs.as_ptr()) };
    let errno = Errno::last();
    report(&cmd.program, errno);
    exit_now(if errno == Errno::ENOENT {
        EXIT_NOT_FOUND
    } else {
        EXIT_NOT_EXECUTABLE
    })
}

fn bind_or_exit(fd: RawFd, target: RawFd) {
    let bound = if fd == target {
        // Already in place, but it still carries the pipe's close-on-exec flag.
        clear_cloexec(fd)
    } else {
        dup2(fd, target).map(drop)
    };
    if let Err(errno) = bound {
        report(c"dup2", errno);
        exit_now(EXIT_REDIRECT_FAILED);
    }
}

fn clear_cloexec(fd: RawFd) -> Result<(), Errno> {
    // SAFETY: plain descriptor flag update, no pointers involved.
    let rc = unsafe { libc::fcntl(fd, libc::F_SETFD, 0) };
    Errno::result(rc).map(drop)
}

fn redirect(path: &CStr, flags: libc::c_int, target: RawFd) -> Result<(), Errno> {
    // SAFETY: `path` is NUL-terminated and outlives the call.
    let fd = unsafe { libc::open(path.as_ptr(), flags, OUTPUT_MODE) };
    if fd == -1 {
        return Err(Errno::last());
    }
    if fd != target {
        dup2(fd, target)?;
        close(fd)?;
    }
    Ok(())
}

fn report(subject: &CStr, errno: Errno) {
    write_stderr(b"tinysh: ");
    write_stderr(subject.to_bytes());
    write_stderr(b": ");
    write_stderr(errno.desc().as_bytes());
    write_stderr(b"\n");
}

fn write_stderr(bytes: &[u8]) {
    unsafe {
        libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len());
    }
}

fn exit_now(code: i32) -> ! {
    // _exit skips atexit handlers and stdio flushing inherited from the parent.
    unsafe { libc::_exit(code) }
}

/// Block until `pid` terminates. Stops and interrupted waits are retried.
pub fn wait(pid: Pid) -> Result<ProcessResult, Errno> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(ProcessResult::exited(code)),
            Ok(WaitStatus::Signaled(_, sig, _)) => return Ok(ProcessResult::killed(sig as i32)),
            Ok(_) | Err(Errno::EINTR) => continue,
            Err(errno) => return Err(errno),
        }
    }
}
