use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use croncape::errors::{CroncapeError, Result};
use croncape::notify::{Deliver, Invocation};

/// A fake delivery backend that:
/// - records every invocation it is asked to run
/// - fails (without recording) for the recipient set in `fail_for`.
#[derive(Clone, Default)]
pub struct FakeDelivery {
    delivered: Arc<Mutex<Vec<Invocation>>>,
    fail_for: Option<String>,
}

impl FakeDelivery {
    pub fn new(delivered: Arc<Mutex<Vec<Invocation>>>) -> Self {
        Self {
            delivered,
            fail_for: None,
        }
    }

    pub fn failing_for(mut self, recipients: &str) -> Self {
        self.fail_for = Some(recipients.to_string());
        self
    }
}

impl Deliver for FakeDelivery {
    fn deliver(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let delivered = Arc::clone(&self.delivered);
        let fail_for = self.fail_for.clone();

        Box::pin(async move {
            if fail_for.as_deref() == Some(invocation.recipients.as_str()) {
                return Err(CroncapeError::Delivery {
                    recipients: invocation.recipients,
                    reason: "simulated failure".to_string(),
                });
            }

            let mut guard = delivered.lock().unwrap();
            guard.push(invocation);
            Ok(())
        })
    }
}
