// src/notify/selector.rs

//! Transport auto-detection.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::errors::{CroncapeError, Result};
use crate::fs::FileSystem;
use crate::types::{TransportKind, TransportPolicy};

/// A transport binary found on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    pub kind: TransportKind,
    pub path: PathBuf,
}

const SENDMAIL_CANDIDATES: &[(&str, TransportKind)] = &[
    ("sendmail", TransportKind::Sendmail),
    ("/usr/sbin/sendmail", TransportKind::Sendmail),
];

const MAIL_CANDIDATES: &[(&str, TransportKind)] = &[
    ("mail", TransportKind::Mail),
    ("/usr/bin/mail", TransportKind::Mail),
];

/// Candidates allowed by `policy`, in lookup order.
///
/// Under `Auto` the sendmail family is tried first, so a host with both
/// families installed always selects sendmail.
pub fn candidates(policy: TransportPolicy) -> Vec<(&'static str, TransportKind)> {
    match policy {
        TransportPolicy::Auto => SENDMAIL_CANDIDATES
            .iter()
            .chain(MAIL_CANDIDATES)
            .copied()
            .collect(),
        TransportPolicy::Sendmail => SENDMAIL_CANDIDATES.to_vec(),
        TransportPolicy::Mail => MAIL_CANDIDATES.to_vec(),
    }
}

/// Pick the first candidate that resolves to an executable.
pub fn select(policy: TransportPolicy, fs: &dyn FileSystem) -> Result<Transport> {
    for (program, kind) in candidates(policy) {
        match fs.resolve_program(program) {
            Some(path) => {
                info!(%kind, path = %path.display(), "selected mail transport");
                return Ok(Transport { kind, path });
            }
            None => debug!(program, "transport candidate not found"),
        }
    }

    Err(CroncapeError::NoTransport(policy))
}
