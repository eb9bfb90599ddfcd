// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::TransportPolicy;

#[derive(Error, Debug)]
pub enum CroncapeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to find a path for {0}")]
    NoTransport(TransportPolicy),

    #[error("Could not send email to {recipients}: {reason}")]
    Delivery { recipients: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CroncapeError>;
