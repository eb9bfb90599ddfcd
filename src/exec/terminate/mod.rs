// src/exec/terminate/mod.rs

//! Process-tree termination.
//!
//! Killing only the direct child is not enough for cron jobs: a shell script
//! that started `rsync` or `pg_dump` would leave those running after the
//! timeout. The supervisor talks to a [`Terminate`] implementation and never
//! to the mechanism behind it:
//!
//! - [`ProcessGroupTerminator`] (unix) starts the child as the leader of a new
//!   process group and sends `SIGKILL` to the whole group. On Linux the child
//!   also gets a parent-death signal so it dies with the supervisor.
//! - [`TreeKillTerminator`] (other platforms) runs `taskkill /F /T` and falls
//!   back to killing the direct child only.
//!
//! [`PlatformTerminator`] names the implementation for the current target.

use std::future::Future;
use std::io;
use std::pin::Pin;

use tokio::process::{Child, Command};

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::ProcessGroupTerminator;
#[cfg(not(unix))]
pub use windows::TreeKillTerminator;

#[cfg(unix)]
pub type PlatformTerminator = ProcessGroupTerminator;
#[cfg(not(unix))]
pub type PlatformTerminator = TreeKillTerminator;

pub type TerminateFuture<'a> = Pin<Box<dyn Future<Output = io::Result<()>> + Send + 'a>>;

/// Capability to kill a child together with every descendant it spawned.
pub trait Terminate: Send + Sync {
    /// Configure the command before it is spawned so that [`terminate`]
    /// can later reach the whole tree.
    ///
    /// [`terminate`]: Terminate::terminate
    fn prepare(&self, cmd: &mut Command);

    /// Forcefully kill the child and its descendants.
    ///
    /// `pid` is the child's id as recorded at spawn. The child itself may
    /// already have been reaped while descendants are still running, so
    /// implementations must not rely on [`Child::id`] alone. Must be harmless
    /// when the tree is already gone. The caller still waits on the child
    /// afterwards to collect its status.
    fn terminate<'a>(&'a self, pid: Option<u32>, child: &'a mut Child) -> TerminateFuture<'a>;
}
