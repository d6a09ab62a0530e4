//! SMTP delivery via `lettre`.
//!
//! [`SmtpMailer`] wraps the async STARTTLS transport and sends plain-text
//! messages. The transport is built once; each `send` opens its own
//! connection from lettre's pool.

use async_trait::async_trait;
use domains::{DomainError, DomainResult, Mailer, OutgoingMail};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

/// Default SMTP port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Error type for SMTP delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SmtpError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

impl From<SmtpError> for DomainError {
    fn from(err: SmtpError) -> Self {
        DomainError::Mail(err.to_string())
    }
}

#[derive(Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// RFC 5322 "From" address.
    pub from: String,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(
                user.clone(),
                pass.expose_secret().to_owned(),
            ));
        }

        Ok(Self {
            from: config.from.parse()?,
            transport: builder.build(),
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, SmtpError> {
        Ok(Message::builder()
            .from(self.from.clone())
            .to(mail.to.parse()?)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()> {
        let message = self.build_message(&mail)?;
        self.transport.send(message).await.map_err(SmtpError::from)?;
        info!(to = %mail.to, subject = %mail.subject, "mail sent");
        Ok(())
    }
}
