// src/config/validate.rs

use std::str::FromStr;
use std::time::Duration;

use crate::config::model::{OutputTarget, RawRequest, Request};
use crate::errors::{CroncapeError, Result};
use crate::types::TransportPolicy;

impl TryFrom<RawRequest> for Request {
    type Error = CroncapeError;

    fn try_from(raw: RawRequest) -> std::result::Result<Self, Self::Error> {
        ensure_has_command(&raw)?;
        let transport =
            TransportPolicy::from_str(&raw.transport).map_err(CroncapeError::ConfigError)?;
        let timeout = parse_timeout(raw.timeout.as_deref())?;
        let output = output_target(&raw)?;

        Ok(Request {
            command: raw.command,
            emails: raw.emails.unwrap_or_default(),
            from: non_empty(raw.from),
            mail_host: non_empty(raw.mail_host),
            timeout,
            transport,
            verbose: raw.verbose,
            output,
        })
    }
}

fn ensure_has_command(raw: &RawRequest) -> Result<()> {
    match raw.command.first() {
        Some(program) if !program.is_empty() => Ok(()),
        _ => Err(CroncapeError::ConfigError(
            "You must pass a command to execute".to_string(),
        )),
    }
}

/// Parse a `-t` value. Absent, blank and zero durations all disable the
/// watchdog.
///
/// Fractional units such as `1.5h` are rejected; `1h30m` is the accepted
/// spelling.
pub fn parse_timeout(value: Option<&str>) -> Result<Option<Duration>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if value == "0" {
        return Ok(None);
    }

    let duration = humantime::parse_duration(value).map_err(|e| {
        CroncapeError::ConfigError(format!(
            "invalid timeout '{value}': {e} (use whole units, e.g. 1h30m)"
        ))
    })?;

    Ok(Some(duration).filter(|d| !d.is_zero()))
}

fn output_target(raw: &RawRequest) -> Result<Option<OutputTarget>> {
    match (&raw.write, &raw.append) {
        (Some(_), Some(_)) => Err(CroncapeError::ConfigError(
            "--write and --append cannot be used together".to_string(),
        )),
        (Some(path), None) => Ok(Some(OutputTarget::Write(path.clone()))),
        (None, Some(path)) => Ok(Some(OutputTarget::Append(path.clone()))),
        (None, None) => Ok(None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
