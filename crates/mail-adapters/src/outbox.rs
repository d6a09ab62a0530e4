//! In-memory mailer that keeps every message it is handed.
//!
//! Used by tests to read verification links back out, and to simulate a
//! failing mail server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use domains::{DomainError, DomainResult, Mailer, OutgoingMail};

#[derive(Debug, Default)]
pub struct OutboxMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    failing: AtomicBool,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every `send` fails with `DomainError::Mail` and nothing is
    /// recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<OutgoingMail> {
        self.sent.lock().ok().and_then(|m| m.last().cloned())
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Mail("outbox is set to fail".to_owned()));
        }
        self.sent
            .lock()
            .map_err(|_| DomainError::Internal("outbox lock poisoned".to_owned()))?
            .push(mail);
        Ok(())
    }
}
