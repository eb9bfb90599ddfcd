// src/exec/terminate/unix.rs

use std::io;

use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tracing::debug;

use super::{Terminate, TerminateFuture};

/// Kills the child's whole process group with `SIGKILL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessGroupTerminator;

impl Terminate for ProcessGroupTerminator {
    fn prepare(&self, cmd: &mut Command) {
        // pgid == pid of the child, so `killpg(pid)` reaches every descendant
        // that does not move itself to another group.
        cmd.process_group(0);

        #[cfg(target_os = "linux")]
        {
            use nix::sys::prctl;

            // SAFETY: the closure runs in the forked child before exec and only
            // issues a single prctl(2) syscall, which is async-signal-safe.
            unsafe {
                cmd.pre_exec(|| prctl::set_pdeathsig(Signal::SIGKILL).map_err(io::Error::from));
            }
        }
    }

    fn terminate<'a>(&'a self, pid: Option<u32>, _child: &'a mut Child) -> TerminateFuture<'a> {
        Box::pin(async move {
            // The group outlives its leader, so the saved pid is used even
            // after the direct child has been reaped.
            let Some(pid) = pid else {
                debug!("child never had a pid; nothing to kill");
                return Ok(());
            };

            let Ok(raw) = i32::try_from(pid) else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("pid {pid} out of range"),
                ));
            };
            let pgid = Pid::from_raw(raw);

            match killpg(pgid, Signal::SIGKILL) {
                Ok(()) => {
                    debug!(pgid = pid, "sent SIGKILL to process group");
                    Ok(())
                }
                Err(Errno::ESRCH) => {
                    debug!(pgid = pid, "process group already gone");
                    Ok(())
                }
                Err(errno) => Err(io::Error::from(errno)),
            }
        })
    }
}
