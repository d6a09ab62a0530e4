//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"message", "code"}` JSON with a status
//! chosen from the domain error variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domains::DomainError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DomainError`] for workflow failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A domain-level error from a workflow.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed request (bad multipart stream, unreadable field).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

/// User-facing text for a failed verification email.
pub const MAIL_FAILED_MESSAGE: &str =
    "Email sending failed. Your submission is saved and still awaiting verification.";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Domain(err) => match err {
                DomainError::MissingFields(_) => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_FIELDS",
                    format!("All fields are required. {err}"),
                ),
                DomainError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                DomainError::DuplicateTitle(_) => (
                    StatusCode::BAD_REQUEST,
                    "DUPLICATE_TITLE",
                    "A post with this title already exists. Please choose a different title."
                        .to_string(),
                ),
                DomainError::NotFound { entity, .. } if *entity == "post" => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Post not found".to_string(),
                ),
                DomainError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }
                DomainError::InvalidToken => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_TOKEN",
                    "Invalid or expired token.".to_string(),
                ),
                DomainError::Mail(reason) => {
                    tracing::error!(error = %reason, "Verification mail failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MAIL_FAILED",
                        MAIL_FAILED_MESSAGE.to_string(),
                    )
                }
                DomainError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
