//! # mail-adapters
//!
//! Implementations of the `Mailer` port.

mod log;
mod outbox;
#[cfg(feature = "mail-smtp")]
pub mod smtp;

pub use log::LogMailer;
pub use outbox::OutboxMailer;
#[cfg(feature = "mail-smtp")]
pub use smtp::{SmtpConfig, SmtpMailer};
