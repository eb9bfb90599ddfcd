// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::types::TransportPolicy;

/// Unvalidated inputs gathered from the command line and the environment.
///
/// Everything is kept as the operator typed it; [`Request::try_from`] does the
/// parsing and checking.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub command: Vec<String>,
    /// `MAILTO`.
    pub emails: Option<String>,
    /// `MAILFROM`.
    pub from: Option<String>,
    /// `MAILHOST`.
    pub mail_host: Option<String>,
    /// `-t`, e.g. `"2h"`, `"30s"`, `"1h30m"`.
    pub timeout: Option<String>,
    /// `-p`.
    pub transport: String,
    pub verbose: bool,
    pub write: Option<PathBuf>,
    pub append: Option<PathBuf>,
}

/// Where captured standard output is persisted after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Create or truncate.
    Write(PathBuf),
    /// Create if missing, then append.
    Append(PathBuf),
}

/// A validated, immutable description of one supervised run.
///
/// Built once at startup and passed by value into the core; nothing below
/// this point reads the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Program followed by its arguments. Never empty.
    pub command: Vec<String>,
    /// Comma-separated recipients. Empty means "print locally".
    pub emails: String,
    pub from: Option<String>,
    /// Overrides the local hostname in the mail subject.
    pub mail_host: Option<String>,
    /// `None` disables the watchdog.
    pub timeout: Option<Duration>,
    pub transport: TransportPolicy,
    pub verbose: bool,
    pub output: Option<OutputTarget>,
}

impl Request {
    /// The command as it would be typed, joined with single spaces.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Trimmed, non-empty recipient addresses in the order given.
    pub fn recipients(&self) -> Vec<String> {
        split_recipients(&self.emails)
    }
}

pub fn split_recipients(emails: &str) -> Vec<String> {
    emails
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
