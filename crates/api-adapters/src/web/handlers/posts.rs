//! Read endpoints: listing with filters, and single post lookup.

use axum::extract::{Path, Query, State};
use axum::Json;
use domains::{DomainError, Post, PostId};
use services::PostQuery;

use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;

/// GET /api/posts?category=&search=
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> ApiResult<Json<Vec<Post>>> {
    let posts = state.queries.query(&query).await?;
    tracing::debug!(
        category = query.category.as_deref().unwrap_or(""),
        search = query.search.as_deref().unwrap_or(""),
        hits = posts.len(),
        "listed posts"
    );
    Ok(Json(posts))
}

/// GET /api/post/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Post>> {
    let id = parse_post_id(&raw_id)?;
    Ok(Json(state.queries.get(id).await?))
}

/// Ids that are not numbers cannot name a post, so they are a 404 rather
/// than a 400.
pub(crate) fn parse_post_id(raw: &str) -> ApiResult<PostId> {
    raw.parse::<u64>().map(PostId).map_err(|_| {
        ApiError::Domain(DomainError::NotFound {
            entity: "post",
            id: raw.to_owned(),
        })
    })
}
