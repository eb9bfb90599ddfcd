// src/report/mod.rs

//! Plain-text run report.
//!
//! The same text is printed locally when no recipients are configured and
//! used as the mail body otherwise, so its layout is effectively a wire
//! format:
//!
//! ```text
//! Cron failure detected
//! =====================
//!
//! false
//!
//! METADATA
//! --------
//!
//! Exit Code: 1
//! Start:     2024-05-01T03:00:00.012Z
//! Stop:      2024-05-01T03:00:00.015Z
//! Duration:  3ms 112us
//!
//! ERROR OUTPUT
//! ------------
//!
//! <stderr>
//!
//! STANDARD OUTPUT
//! ---------------
//!
//! <stdout>
//! ```

use std::time::{Duration, SystemTime};

use crate::exec::RunResult;
use crate::types::Outcome;

/// Render the report for a finished run. Pure; the same result always
/// renders to the same text.
pub fn render(result: &RunResult) -> String {
    format!(
        "{title}

{command}

METADATA
--------

Exit Code: {code}
Start:     {started}
Stop:      {stopped}
Duration:  {duration}

ERROR OUTPUT
------------

{stderr}

STANDARD OUTPUT
---------------

{stdout}
",
        title = title(result.outcome()),
        command = result.request.command_line(),
        code = result.code,
        started = format_timestamp(result.started),
        stopped = format_timestamp(result.stopped),
        duration = format_duration(result.elapsed),
        stderr = result.stderr_lossy(),
        stdout = result.stdout_lossy(),
    )
}

/// Title line plus an `=` underline of the same length.
pub fn title(outcome: Outcome) -> String {
    let msg = outcome.title();
    format!("{msg}\n{}", "=".repeat(msg.len()))
}

fn format_timestamp(at: SystemTime) -> String {
    humantime::format_rfc3339_millis(at).to_string()
}

fn format_duration(elapsed: Duration) -> String {
    if elapsed.is_zero() {
        return "0s".to_string();
    }
    humantime::format_duration(elapsed).to_string()
}
