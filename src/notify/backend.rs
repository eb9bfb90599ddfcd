// src/notify/backend.rs

//! Pluggable delivery backend.
//!
//! The notifier hands fully built [`Invocation`]s to a [`Deliver`]
//! implementation instead of spawning processes itself.
//!
//! - `RealDelivery` is the default implementation used by `croncape`. It
//!   runs the transport binary and pipes the message to its stdin.
//! - Tests can provide their own `Deliver` that records invocations or
//!   simulates failures.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{CroncapeError, Result};
use crate::notify::message::Invocation;

/// Trait abstracting how transport invocations are carried out.
pub trait Deliver: Send {
    /// Run one invocation. A non-zero exit of the transport is an error.
    fn deliver(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real delivery backend used in production.
#[derive(Debug, Clone, Default)]
pub struct RealDelivery;

impl Deliver for RealDelivery {
    fn deliver(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            info!(
                program = %invocation.program.display(),
                args = ?invocation.args,
                recipients = %invocation.recipients,
                "invoking mail transport"
            );

            run_transport(&invocation)
                .await
                .map_err(|err| CroncapeError::Delivery {
                    recipients: invocation.recipients.clone(),
                    reason: err.to_string(),
                })
        })
    }
}

async fn run_transport(invocation: &Invocation) -> io::Result<()> {
    let output: fn() -> Stdio = if invocation.inherit_output {
        Stdio::inherit
    } else {
        Stdio::null
    };

    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::piped())
        .stdout(output())
        .stderr(output())
        .spawn()?;

    // Dropping stdin after the write sends EOF.
    let write_result = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(&invocation.stdin).await,
        None => Ok(()),
    };

    let status = child.wait().await?;
    if !status.success() {
        return Err(io::Error::other(format!("transport exited with {status}")));
    }

    // A transport that exits 0 without reading all of stdin still delivered.
    match write_result {
        Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(err),
        _ => {
            debug!(recipients = %invocation.recipients, "transport finished");
            Ok(())
        }
    }
}
