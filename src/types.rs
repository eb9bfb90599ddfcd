use std::fmt;
use std::str::FromStr;

/// Which mail transports the operator allows.
///
/// - `Auto`: any installed transport, sendmail family first.
/// - `Mail`: only `mail`-style binaries.
/// - `Sendmail`: only `sendmail`-style binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportPolicy {
    #[default]
    Auto,
    Mail,
    Sendmail,
}

impl FromStr for TransportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(TransportPolicy::Auto),
            "mail" => Ok(TransportPolicy::Mail),
            "sendmail" => Ok(TransportPolicy::Sendmail),
            other => Err(format!(
                "Unsupported transport {other} (expected \"auto\", \"mail\" or \"sendmail\")"
            )),
        }
    }
}

impl fmt::Display for TransportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportPolicy::Auto => "auto",
            TransportPolicy::Mail => "mail",
            TransportPolicy::Sendmail => "sendmail",
        };
        f.write_str(s)
    }
}

/// The concrete transport a policy resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// One invocation per recipient: `mail -s <subject> [-a <from>] <to>`.
    Mail,
    /// One invocation total: `sendmail -t` with an RFC-822 message on stdin.
    Sendmail,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Mail => f.write_str("mail"),
            TransportKind::Sendmail => f.write_str("sendmail"),
        }
    }
}

/// Classification of a finished run, shared by the report title and the mail
/// subject so both always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    Timeout,
}

impl Outcome {
    /// Timeout wins over the exit code; otherwise zero means success.
    pub fn classify(killed: bool, code: i32) -> Self {
        if killed {
            Outcome::Timeout
        } else if code == 0 {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Outcome::Success => "Cron success",
            Outcome::Failure => "Cron failure detected",
            Outcome::Timeout => "Cron timeout detected",
        }
    }

    pub fn subject_suffix(self) -> &'static str {
        match self {
            Outcome::Success => "Command Successful",
            Outcome::Failure => "Failure",
            Outcome::Timeout => "Timeout",
        }
    }
}
