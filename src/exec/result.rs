// src/exec/result.rs

use std::borrow::Cow;
use std::time::{Duration, SystemTime};

use crate::config::Request;
use crate::types::Outcome;

/// Everything observed about one supervised run.
///
/// Produced exactly once by [`execute`](crate::exec::execute) and only read
/// afterwards by the report renderer and the notifier.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub request: Request,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub started: SystemTime,
    /// Always `started + elapsed`, so it never precedes `started`.
    pub stopped: SystemTime,
    /// Measured on the monotonic clock.
    pub elapsed: Duration,
    /// The watchdog fired before the command finished on its own.
    pub killed: bool,
    /// `127` when the command never started, `-1` when the exit status could
    /// not be decoded.
    pub code: i32,
}

impl RunResult {
    pub fn outcome(&self) -> Outcome {
        Outcome::classify(self.killed, self.code)
    }

    /// Whether this run warrants a report at all.
    pub fn should_report(&self) -> bool {
        self.killed || self.code != 0 || self.request.verbose
    }

    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}
