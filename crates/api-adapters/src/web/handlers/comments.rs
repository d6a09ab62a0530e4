use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::web::error::ApiResult;
use crate::web::extract::JsonOrForm;
use crate::web::handlers::posts::parse_post_id;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// POST /api/comment/{id}, JSON or urlencoded.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonOrForm(body): JsonOrForm<CommentRequest>,
) -> ApiResult<Json<Value>> {
    let id = parse_post_id(&raw_id)?;
    let result = state
        .comments
        .add_comment(
            id,
            body.name.as_deref().unwrap_or_default(),
            body.comment.as_deref().unwrap_or_default(),
        )
        .await;
    state.metrics.record_comment(&result);
    result?;

    Ok(Json(json!({ "message": "Comment added!" })))
}
