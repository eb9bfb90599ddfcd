// src/notify/subject.rs

use tracing::debug;

use crate::types::Outcome;

/// Hostname used when neither an override nor the OS provides one.
pub const UNDEFINED_HOST: &str = "undefined";

/// `"Cron on host <host>: <Timeout|Command Successful|Failure>"`.
pub fn subject(outcome: Outcome, host: &str) -> String {
    format!("Cron on host {host}: {}", outcome.subject_suffix())
}

/// The override when set, else the local hostname, else `undefined`.
pub fn resolve_hostname(override_host: Option<&str>) -> String {
    if let Some(host) = override_host.map(str::trim).filter(|h| !h.is_empty()) {
        return host.to_string();
    }

    local_hostname().unwrap_or_else(|| UNDEFINED_HOST.to_string())
}

#[cfg(unix)]
fn local_hostname() -> Option<String> {
    match nix::unistd::gethostname() {
        Ok(name) => Some(name.to_string_lossy().into_owned()).filter(|h| !h.is_empty()),
        Err(errno) => {
            debug!(error = %errno, "gethostname failed");
            None
        }
    }
}

#[cfg(not(unix))]
fn local_hostname() -> Option<String> {
    let host = std::env::var("COMPUTERNAME").ok().filter(|h| !h.is_empty());
    if host.is_none() {
        debug!("COMPUTERNAME is not set");
    }
    host
}
