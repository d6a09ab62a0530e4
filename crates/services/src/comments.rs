//! # Comment Workflow

use std::sync::Arc;

use chrono::Utc;
use domains::{Comment, DomainError, DomainResult, PostId, PostRepository};
use tracing::info;

pub struct CommentService {
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Appends a comment to an existing post.
    ///
    /// The post is resolved first, so an unknown id wins over empty fields.
    pub async fn add_comment(&self, post_id: PostId, name: &str, text: &str) -> DomainResult<Comment> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::NotFound {
                entity: "post",
                id: post_id.to_string(),
            });
        }

        let mut missing = Vec::new();
        if name.trim().is_empty() {
            missing.push("name");
        }
        if text.trim().is_empty() {
            missing.push("comment");
        }
        if !missing.is_empty() {
            return Err(DomainError::MissingFields(missing));
        }

        let comment = Comment {
            name: name.to_owned(),
            comment: text.to_owned(),
            date: Utc::now(),
        };
        self.posts.add_comment(post_id, comment.clone()).await?;
        info!(%post_id, "comment added");

        Ok(comment)
    }
}
