//! Launch an executable and capture its output.

use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::error::{Error, Result};

/// Exit status and captured streams of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs one command to completion.
///
/// A nonzero exit is returned as data; only failure to launch or to read the
/// output is an error.
pub trait CommandRunner {
    fn run(&mut self, program: &Path, args: &[OsString]) -> Result<ProcessOutput>;
}

/// Runs commands as real child processes, without a shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, program: &Path, args: &[OsString]) -> Result<ProcessOutput> {
        run_process(program, args)
    }
}

type Drain = JoinHandle<std::io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(mut reader: R) -> Drain {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

/// Spawn `program`, drain stdout and stderr on two threads while waiting for
/// it, and return the exit code with both streams.
///
/// Both drain threads are joined and the child is reaped before any error is
/// returned, so no output is lost and no zombie is left behind.
pub fn run_process(program: &Path, args: &[OsString]) -> Result<ProcessOutput> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::LaunchFailed {
            program: program.to_path_buf(),
            source,
        })?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = child.wait();
    let stdout = join_drain(stdout);
    let stderr = join_drain(stderr);

    let status = status.map_err(|source| Error::WaitFailed {
        program: program.to_path_buf(),
        source,
    })?;
    let stdout = finish(program, "stdout", stdout)?;
    let stderr = finish(program, "stderr", stderr)?;

    debug!(
        program = %program.display(),
        code = ?status.code(),
        stdout_len = stdout.len(),
        stderr_len = stderr.len(),
        "process exited"
    );

    Ok(ProcessOutput {
        code: status.code(),
        stdout,
        stderr,
    })
}

type Joined = thread::Result<std::io::Result<Vec<u8>>>;

fn join_drain(handle: Option<Drain>) -> Joined {
    match handle {
        Some(h) => h.join(),
        None => Ok(Ok(Vec::new())),
    }
}

fn finish(program: &Path, stream: &'static str, joined: Joined) -> Result<String> {
    match joined {
        Ok(Ok(bytes)) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Ok(Err(e)) => Err(Error::StreamCapture {
            program: program.to_path_buf(),
            stream,
            reason: e.to_string(),
        }),
        // The child is already reaped at this point.
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
