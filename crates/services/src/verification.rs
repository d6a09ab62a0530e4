//! # Verification Workflow
//!
//! Pending -> Published. Consuming the token and promoting the draft is the
//! only state transition in the system; nothing un-publishes or re-pends.

use std::sync::Arc;

use domains::{DomainError, DomainResult, PendingRegistry, Post, PostRepository};
use tracing::{info, warn};

pub struct VerificationService {
    posts: Arc<dyn PostRepository>,
    pending: Arc<dyn PendingRegistry>,
}

impl VerificationService {
    pub fn new(posts: Arc<dyn PostRepository>, pending: Arc<dyn PendingRegistry>) -> Self {
        Self { posts, pending }
    }

    /// Redeems `token` and returns the newly published post.
    ///
    /// Unknown and already used tokens are both `InvalidToken`. The token is
    /// spent even if publishing then fails on a title clash with a post
    /// verified in the meantime.
    pub async fn verify(&self, token: &str) -> DomainResult<Post> {
        if token.is_empty() {
            return Err(DomainError::InvalidToken);
        }

        let draft = self
            .pending
            .take(token)
            .await?
            .ok_or(DomainError::InvalidToken)?;

        match self.posts.append(draft.into_verified()).await {
            Ok(post) => {
                info!(post_id = %post.id, category = %post.category, "post verified and published");
                Ok(post)
            }
            Err(err) => {
                warn!(error = %err, "verified draft could not be published");
                Err(err)
            }
        }
    }
}
