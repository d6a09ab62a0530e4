//! Shared handler state.

use std::sync::Arc;

use domains::{Mailer, MediaStorage, PendingRegistry, PostRepository, TokenGenerator};
use services::{
    CommentService, PostQueryService, SubmissionService, SubmissionSettings, VerificationService,
};

use crate::metrics::Metrics;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<PostQueryService>,
    pub submissions: Arc<SubmissionService>,
    pub verifications: Arc<VerificationService>,
    pub comments: Arc<CommentService>,
    /// Receives uploaded images before the submission workflow runs.
    pub media: Arc<dyn MediaStorage>,
    pub posts: Arc<dyn PostRepository>,
    pub pending: Arc<dyn PendingRegistry>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wires every workflow over one post store and one pending registry.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        pending: Arc<dyn PendingRegistry>,
        mailer: Arc<dyn Mailer>,
        media: Arc<dyn MediaStorage>,
        tokens: Arc<dyn TokenGenerator>,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            queries: Arc::new(PostQueryService::new(Arc::clone(&posts))),
            submissions: Arc::new(SubmissionService::new(
                Arc::clone(&posts),
                Arc::clone(&pending),
                mailer,
                tokens,
                settings,
            )),
            verifications: Arc::new(VerificationService::new(
                Arc::clone(&posts),
                Arc::clone(&pending),
            )),
            comments: Arc::new(CommentService::new(Arc::clone(&posts))),
            media,
            posts,
            pending,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
