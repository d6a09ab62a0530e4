//! Development mailer: writes the message to the log instead of sending it.

use async_trait::async_trait;
use domains::{DomainResult, Mailer, OutgoingMail};
use tracing::info;

#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()> {
        info!(
            from = %self.from,
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.body,
            "mail transport is 'log'; message not delivered"
        );
        Ok(())
    }
}
