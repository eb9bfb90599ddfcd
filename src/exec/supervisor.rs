// src/exec/supervisor.rs

//! Runs one command to completion, capturing its output and enforcing the
//! optional timeout.

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant, SystemTime};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::Request;
use crate::exec::exit::{self, SPAWN_FAILED, UNDECODABLE};
use crate::exec::result::RunResult;
use crate::exec::terminate::{PlatformTerminator, Terminate};


/// Execute `request` in `dir` with the platform's process-tree terminator.
pub async fn execute(dir: &Path, request: Request) -> RunResult {
    execute_with(dir, request, &PlatformTerminator::default()).await
}

/// Execute `request` in `dir`, using `terminator` when the timeout elapses.
///
/// Never fails: spawn, wait and kill errors are folded into the result's
/// stderr and exit code so they end up in the report.
pub async fn execute_with<T>(dir: &Path, request: Request, terminator: &T) -> RunResult
where
    T: Terminate + ?Sized,
{
    let started = SystemTime::now();
    let clock = Instant::now();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut killed = false;

    let code = match spawn(dir, &request, terminator) {
        Err(err) => {
            warn!(command = %request.command_line(), error = %err, "failed to start command");
            append_note(&mut stderr, &err.to_string());
            SPAWN_FAILED
        }
        Ok(mut child) => {
            // Saved up front: `id()` goes away once the child is reaped, but
            // its process group may outlive it.
            let pid = child.id();
            info!(?pid, command = %request.command_line(), "command started");

            let readers = Readers {
                stdout: spawn_capture(child.stdout.take()),
                stderr: spawn_capture(child.stderr.take()),
            };

            let waited =
                wait_with_watchdog(&mut child, pid, readers, request.timeout, terminator).await;
            killed = waited.killed;

            collect_capture(waited.stdout, &mut stdout, "stdout");
            collect_capture(waited.stderr, &mut stderr, "stderr");

            for note in &waited.notes {
                append_note(&mut stderr, note);
            }
            waited.code
        }
    };

    let elapsed = clock.elapsed();
    info!(code, killed, ?elapsed, "command finished");

    RunResult {
        request,
        stdout,
        stderr,
        started,
        stopped: started + elapsed,
        elapsed,
        killed,
        code,
    }
}

fn spawn<T>(dir: &Path, request: &Request, terminator: &T) -> io::Result<Child>
where
    T: Terminate + ?Sized,
{
    let Some((program, args)) = request.command.split_first() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    terminator.prepare(&mut cmd);

    cmd.spawn()
}

struct Readers {
    stdout: JoinHandle<Capture>,
    stderr: JoinHandle<Capture>,
}

type Captured = Result<Capture, JoinError>;

struct Waited {
    code: i32,
    killed: bool,
    notes: Vec<String>,
    stdout: Captured,
    stderr: Captured,
}

/// Wait until the child has exited and both pipes are closed, racing a
/// single-fire timer when a timeout is set.
///
/// The deadline covers the pipes too: a background descendant that keeps
/// stdout open is still part of the job, and the group is killed even when
/// the direct child has already been reaped.
async fn wait_with_watchdog<T>(
    child: &mut Child,
    pid: Option<u32>,
    mut readers: Readers,
    timeout: Option<Duration>,
    terminator: &T,
) -> Waited
where
    T: Terminate + ?Sized,
{
    let mut notes = Vec::new();

    // Each slot is filled right after its future resolves, so whatever is
    // still empty after an interrupted wait has never been polled to
    // completion and can be awaited again.
    let mut status = None;
    let mut stdout = None;
    let mut stderr = None;

    let settle = async {
        status = Some(child.wait().await);
        stdout = Some((&mut readers.stdout).await);
        stderr = Some((&mut readers.stderr).await);
    };

    let killed = match timeout {
        None => {
            settle.await;
            false
        }
        Some(limit) => tokio::select! {
            () = settle => false,
            () = tokio::time::sleep(limit) => true,
        },
    };

    if killed {
        warn!(?pid, ?timeout, reaped = status.is_some(), "timeout elapsed; killing process tree");
        if let Err(err) = terminator.terminate(pid, child).await {
            warn!(error = %err, "failed to kill process tree");
            notes.push(format!("Unable to kill the process: {err}"));
        }
    }

    let status = match status {
        Some(status) => status,
        None => child.wait().await,
    };
    let stdout = match stdout {
        Some(captured) => captured,
        None => readers.stdout.await,
    };
    let stderr = match stderr {
        Some(captured) => captured,
        None => readers.stderr.await,
    };

    let code = match status {
        Ok(status) => exit::decode(status).code(),
        Err(err) => {
            warn!(error = %err, "failed to wait for command");
            notes.push(format!("Unable to wait for the process: {err}"));
            UNDECODABLE
        }
    };

    Waited {
        code,
        killed,
        notes,
        stdout,
        stderr,
    }
}

struct Capture {
    bytes: Vec<u8>,
    error: Option<io::Error>,
}

/// Drain a child pipe into memory on its own task. Keeps whatever was read
/// before an I/O error.
fn spawn_capture<R>(pipe: Option<R>) -> JoinHandle<Capture>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut bytes = Vec::new();
        let error = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut bytes).await.err(),
            None => None,
        };
        Capture { bytes, error }
    })
}

fn collect_capture(captured: Captured, target: &mut Vec<u8>, stream: &str) {
    match captured {
        Ok(capture) => {
            debug!(stream, bytes = capture.bytes.len(), "captured output");
            target.extend_from_slice(&capture.bytes);
            if let Some(err) = capture.error {
                warn!(stream, error = %err, "output capture interrupted");
                append_note(target, &format!("Unable to read {stream}: {err}"));
            }
        }
        Err(err) => {
            warn!(stream, error = %err, "output capture task failed");
        }
    }
}

fn append_note(buf: &mut Vec<u8>, note: &str) {
    buf.push(b'\n');
    buf.extend_from_slice(note.as_bytes());
    buf.push(b'\n');
}
