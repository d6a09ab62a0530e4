//! POST /api/submit: multipart form with an optional `image` file, or a
//! urlencoded form without one.
//!
//! The image goes to the media store first; the submission workflow only
//! sees the resulting reference path.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use domains::DraftFields;
use serde_json::{json, Value};

use crate::web::error::{ApiError, ApiResult};
use crate::web::extract::SubmissionBody;
use crate::web::state::AppState;

pub const SUBMITTED_MESSAGE: &str = "Check your email for a verification link!";

struct Upload {
    file_name: Option<String>,
    content_type: mime::Mime,
    data: Bytes,
}

pub async fn submit_post(
    State(state): State<AppState>,
    body: SubmissionBody,
) -> ApiResult<Json<Value>> {
    let (fields, upload) = match body {
        SubmissionBody::Multipart(multipart) => read_multipart(multipart).await?,
        SubmissionBody::Form(fields) => (fields, None),
    };

    let image = match upload {
        Some(u) => Some(state.media.store(u.file_name, u.content_type, u.data).await?),
        None => None,
    };

    let result = state.submissions.submit(fields, image).await;
    state.metrics.record_submission(&result);
    result?;

    Ok(Json(json!({ "message": SUBMITTED_MESSAGE })))
}

async fn read_multipart(mut multipart: Multipart) -> ApiResult<(DraftFields, Option<Upload>)> {
    let mut fields = DraftFields::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field
                .content_type()
                .and_then(|ct| ct.parse::<mime::Mime>().ok())
                .unwrap_or(mime::APPLICATION_OCTET_STREAM);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;

            // Browsers send an empty part when no file was picked.
            if !data.is_empty() {
                upload = Some(Upload {
                    file_name,
                    content_type,
                    data,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let slot = match name.as_str() {
            "name" => &mut fields.name,
            "email" => &mut fields.email,
            "title" => &mut fields.title,
            "category" => &mut fields.category,
            "description" => &mut fields.description,
            "content" => &mut fields.content,
            _ => continue,
        };
        *slot = Some(value);
    }

    Ok((fields, upload))
}
