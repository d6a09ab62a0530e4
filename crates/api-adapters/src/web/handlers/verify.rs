use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use domains::DomainError;
use serde::Deserialize;

use crate::web::error::ApiError;
use crate::web::state::AppState;

/// Where a successfully verified submitter lands.
pub const VERIFY_SUCCESS_PATH: &str = "/verify-success";

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub token: Option<String>,
}

/// GET /api/verify?token=
///
/// Opened from an email client, so failures are plain text rather than JSON.
pub async fn verify_post(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let token = params.token.unwrap_or_default();
    let result = state.verifications.verify(&token).await;
    state.metrics.record_verification(&result);

    match result {
        Ok(_) => Redirect::to(VERIFY_SUCCESS_PATH).into_response(),
        Err(DomainError::InvalidToken) => {
            (StatusCode::BAD_REQUEST, "Invalid or expired token.").into_response()
        }
        Err(other) => ApiError::from(other).into_response(),
    }
}
