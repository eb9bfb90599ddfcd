// src/exec/terminate/windows.rs

use std::io;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::{Terminate, TerminateFuture};

/// Kills the child's tree with `taskkill /F /T`, or just the child when the
/// utility is missing or fails. Descendants may survive in the fallback case.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeKillTerminator;

impl Terminate for TreeKillTerminator {
    fn prepare(&self, _cmd: &mut Command) {}

    fn terminate<'a>(&'a self, pid: Option<u32>, child: &'a mut Child) -> TerminateFuture<'a> {
        Box::pin(async move {
            let Some(pid) = pid else {
                debug!("child never had a pid; nothing to kill");
                return Ok(());
            };

            let status = Command::new("taskkill")
                .args(["/F", "/T", "/PID", &pid.to_string()])
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;

            match status {
                Ok(status) if status.success() => {
                    debug!(pid, "process tree killed with taskkill");
                    return Ok(());
                }
                Ok(status) => {
                    warn!(pid, code = ?status.code(), "taskkill failed; killing direct child only");
                }
                Err(e) => {
                    warn!(pid, error = %e, "taskkill unavailable; killing direct child only");
                }
            }

            if child.id().is_none() {
                // Already reaped and taskkill could not reach its descendants.
                return Err(io::Error::other(format!(
                    "taskkill failed and process {pid} has already exited"
                )));
            }
            child.start_kill()
        })
    }
}
