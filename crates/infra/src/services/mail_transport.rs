use feed_digest_domain::DigestPayload;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("mail transport rejected digest for `{email}`: {msg}")]
    Send { email: String, msg: String },
    #[error("sending digest to `{email}` timed out")]
    Timeout { email: String },
}

/// Hands a digest payload to the actual email machinery. Rendering and
/// SMTP live outside this core; an `Ok` here is the delivery
/// confirmation the dispatcher clears pending state on.
#[async_trait::async_trait]
pub trait IMailTransport: Send + Sync {
    async fn send(&self, email: &str, payload: &DigestPayload) -> Result<(), DeliveryError>;
}

/// Test double recording every payload it was asked to send. Can be
/// switched into a failing mode to exercise retry paths.
pub struct InMemoryMailTransport {
    sent: Mutex<Vec<(String, DigestPayload)>>,
    failing: AtomicBool,
}

impl InMemoryMailTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, DigestPayload)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailTransport for InMemoryMailTransport {
    async fn send(&self, email: &str, payload: &DigestPayload) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Send {
                email: email.to_string(),
                msg: "transport is failing".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), payload.clone()));
        Ok(())
    }
}
