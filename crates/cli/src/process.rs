// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution bound to a [`RunContext`].
//!
//! Pipes are drained on helper threads so a chatty child never blocks on a
//! full pipe while we poll for its exit. On Unix the child leads its own
//! process group. When the context ends first, whether the child is still
//! running or has exited leaving descendants that hold its pipes open, the
//! whole group is killed and the child reaped before returning.

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};

use crate::context::{ContextError, RunContext};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to wait for stderr after killing a child whose descendants may
/// still hold the pipe open.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Output of a completed child process.
#[derive(Debug)]
pub struct Output {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The context ended before the child exited; the child was killed.
    #[error("{program} interrupted: {reason}")]
    Interrupted {
        program: String,
        reason: ContextError,
        stderr: String,
    },
}

/// Render a command line for diagnostics.
pub fn display_command(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `command` to completion, feeding `stdin` and capturing output.
///
/// Returns [`ProcessError::Interrupted`] if `ctx` is cancelled or its
/// deadline passes while the child is running.
pub fn run(
    command: &mut Command,
    stdin: Option<&[u8]>,
    ctx: &RunContext,
) -> Result<Output, ProcessError> {
    let program = command.get_program().to_string_lossy().into_owned();

    if let Some(reason) = ctx.err() {
        return Err(ProcessError::Interrupted {
            program,
            reason,
            stderr: String::new(),
        });
    }

    command
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    tracing::trace!("spawning {}", display_command(command));
    let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
        program: program.clone(),
        source,
    })?;

    if let (Some(mut pipe), Some(data)) = (child.stdin.take(), stdin) {
        let data = data.to_vec();
        // A child that exits without reading its input closes the pipe;
        // that is not our failure to report.
        thread::spawn(move || {
            let _ = pipe.write_all(&data);
        });
    }

    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if let Some(reason) = ctx.err() {
                    terminate(&mut child);
                    return Err(interrupted(program, reason, &stderr_rx));
                }
                thread::sleep(poll_interval(ctx));
            }
            Err(source) => {
                terminate(&mut child);
                return Err(ProcessError::Wait { program, source });
            }
        }
    };

    // Descendants may still hold the pipes after the child exits.
    let stdout = match collect(&stdout_rx, ctx) {
        Ok(bytes) => bytes,
        Err(reason) => {
            kill_group(child.id());
            return Err(interrupted(program, reason, &stderr_rx));
        }
    };
    let stderr = match collect(&stderr_rx, ctx) {
        Ok(bytes) => bytes,
        Err(reason) => {
            kill_group(child.id());
            return Err(interrupted(program, reason, &stderr_rx));
        }
    };

    Ok(Output {
        status,
        stdout: lossy(stdout),
        stderr: lossy(stderr),
    })
}

/// Poll no later than the context deadline.
fn poll_interval(ctx: &RunContext) -> Duration {
    ctx.remaining()
        .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL))
}

/// Wait for a drained pipe, giving up when the context ends.
fn collect(rx: &Receiver<Vec<u8>>, ctx: &RunContext) -> Result<Vec<u8>, ContextError> {
    loop {
        match rx.recv_timeout(poll_interval(ctx)) {
            Ok(bytes) => return Ok(bytes),
            Err(RecvTimeoutError::Disconnected) => return Ok(Vec::new()),
            Err(RecvTimeoutError::Timeout) => ctx.check()?,
        }
    }
}

fn interrupted(
    program: String,
    reason: ContextError,
    stderr_rx: &Receiver<Vec<u8>>,
) -> ProcessError {
    let stderr = stderr_rx.recv_timeout(DRAIN_GRACE).unwrap_or_default();
    tracing::trace!("killed {program}: {reason}");
    ProcessError::Interrupted {
        program,
        reason,
        stderr: lossy(stderr),
    }
}

/// Kill the child with its process group and reap it.
fn terminate(child: &mut Child) {
    kill_group(child.id());
    let _ = child.kill();
    let _ = child.wait();
}

/// Kill every process in the group led by `pid`.
#[cfg(unix)]
fn kill_group(pid: u32) {
    let status = Command::new("kill")
        .args(["-KILL", "--", &format!("-{pid}")])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = status {
        tracing::debug!("failed to kill process group {pid}: {e}");
    }
}

#[cfg(not(unix))]
fn kill_group(_pid: u32) {}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = bounded(1);
    match pipe {
        Some(mut pipe) => {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
        }
        None => {
            let _ = tx.send(Vec::new());
        }
    }
    rx
}

fn lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
