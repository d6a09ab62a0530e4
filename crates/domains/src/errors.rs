//! # DomainError
//!
//! Centralized error handling for the blog board.
//! Every workflow reports one of these synchronously; none is retried.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Required submission or comment fields were absent or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field was present but unacceptable (e.g. unknown category)
    #[error("validation error: {0}")]
    Validation(String),

    /// A published post already uses this title (case-insensitive)
    #[error("a post titled '{0}' already exists")]
    DuplicateTitle(String),

    /// Resource not found (e.g. Post)
    #[error("{entity} not found with ID {id}")]
    NotFound { entity: &'static str, id: String },

    /// The verification token was never issued or has already been used.
    #[error("invalid or expired verification token")]
    InvalidToken,

    /// The mail collaborator failed or timed out. The pending draft is kept.
    #[error("mail delivery failed: {0}")]
    Mail(String),

    /// Infrastructure failure (e.g. disk write, token collision)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True for the variants callers should present as "fix your input".
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::MissingFields(_) | DomainError::Validation(_) | DomainError::DuplicateTitle(_)
        )
    }
}

/// A specialized Result type for domain logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
