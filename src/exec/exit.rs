// src/exec/exit.rs

//! Exit status decoding.

use std::process::ExitStatus;

use tracing::debug;

/// Code recorded when the command could not be started at all.
pub const SPAWN_FAILED: i32 = 127;

/// Code recorded when the command ended abnormally and no exit code could be
/// recovered (e.g. it was killed by a signal).
pub const UNDECODABLE: i32 = -1;

/// Result of inspecting a child's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecode {
    Code(i32),
    Undecodable,
}

impl ExitDecode {
    pub fn code(self) -> i32 {
        match self {
            ExitDecode::Code(code) => code,
            ExitDecode::Undecodable => UNDECODABLE,
        }
    }
}

/// Turn an OS exit status into a well-formed code when one exists.
pub fn decode(status: ExitStatus) -> ExitDecode {
    if let Some(code) = status.code() {
        return ExitDecode::Code(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        debug!(
            signal = ?status.signal(),
            core_dumped = status.core_dumped(),
            "child terminated without an exit code"
        );
    }
    #[cfg(not(unix))]
    debug!(?status, "child terminated without an exit code");

    ExitDecode::Undecodable
}
