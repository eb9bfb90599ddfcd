// src/notify/mod.rs

//! Notification dispatch.
//!
//! - [`selector`] finds an installed transport for the requested policy.
//! - [`subject`] builds the subject line and resolves the hostname in it.
//! - [`message`] turns a report into transport invocations.
//! - [`backend`] runs those invocations ([`RealDelivery`]) or lets tests
//!   intercept them.

pub mod backend;
pub mod message;
pub mod selector;
pub mod subject;

pub use backend::{Deliver, RealDelivery};
pub use message::{Envelope, Invocation, build_invocations, sendmail_message};
pub use selector::{Transport, select};
pub use subject::{resolve_hostname, subject};

use tracing::info;

use crate::errors::Result;
use crate::exec::RunResult;
use crate::report;

/// Delivers rendered reports through a [`Deliver`] backend.
pub struct Notifier<D: Deliver> {
    delivery: D,
}

impl<D: Deliver> Notifier<D> {
    pub fn new(delivery: D) -> Self {
        Self { delivery }
    }

    /// Send `envelope` through `transport`.
    ///
    /// Invocations run one after another; the first failure stops the rest
    /// and is returned. Nothing is retried.
    pub async fn notify(&mut self, transport: &Transport, envelope: &Envelope<'_>) -> Result<()> {
        let invocations = build_invocations(transport, envelope);
        info!(
            kind = %transport.kind,
            invocations = invocations.len(),
            "delivering report"
        );

        for invocation in invocations {
            self.delivery.deliver(invocation).await?;
        }
        Ok(())
    }

    /// Render `result` and mail it to the request's recipients.
    pub async fn notify_result(
        &mut self,
        result: &RunResult,
        transport: &Transport,
        hostname: &str,
    ) -> Result<()> {
        let body = report::render(result);
        let subject = subject(result.outcome(), hostname);
        let recipients = result.request.recipients();

        let envelope = Envelope {
            subject: &subject,
            from: result.request.from.as_deref(),
            recipients: &recipients,
            body: &body,
        };
        self.notify(transport, &envelope).await
    }
}
