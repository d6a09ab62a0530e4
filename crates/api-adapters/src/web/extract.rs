//! Body extractors for the write endpoints.
//!
//! Both endpoints accept `application/x-www-form-urlencoded` besides their
//! primary encoding, and every rejection is reported as an [`ApiError`] so
//! clients always get the JSON error body.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::{Form, Json};
use domains::DraftFields;
use serde::de::DeserializeOwned;

use crate::web::error::ApiError;

fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|m| m.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
}

/// A JSON body, or the same fields sent as a urlencoded form.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_urlencoded(req.headers()) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Submission body: multipart (the only way to attach an image) or a plain
/// urlencoded form.
pub enum SubmissionBody {
    Multipart(Multipart),
    Form(DraftFields),
}

impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_urlencoded(req.headers()) {
            let Form(fields) = Form::<DraftFields>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            return Ok(Self::Form(fields));
        }

        Multipart::from_request(req, state)
            .await
            .map(Self::Multipart)
            .map_err(|e| ApiError::BadRequest(e.body_text()))
    }
}
