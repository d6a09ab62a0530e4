//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;

use crate::errors::DomainResult;
use crate::models::{Comment, NewPost, OutgoingMail, PendingDraft, Post, PostId, VerificationToken};

/// The ordered collection of published posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in insertion order.
    async fn list_all(&self) -> DomainResult<Vec<Post>>;

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;

    /// Case-insensitive title lookup.
    async fn title_exists(&self, title: &str) -> DomainResult<bool>;

    /// Assigns the next identifier and inserts the post.
    ///
    /// The title uniqueness check and the id assignment must be one atomic
    /// step; a clash returns `DomainError::DuplicateTitle`.
    async fn append(&self, post: NewPost) -> DomainResult<Post>;

    /// Appends to the post's comment list. The only in-place mutation.
    async fn add_comment(&self, id: PostId, comment: Comment) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<usize>;
}

/// Drafts waiting for email verification, keyed by single-use token.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PendingRegistry: Send + Sync {
    /// Stores a draft under a fresh token. A token that is already present is
    /// an internal error; tokens are never reused.
    async fn stage(&self, token: VerificationToken, draft: PendingDraft) -> DomainResult<()>;

    /// Removes and returns the draft for `token`. A second call with the same
    /// token returns `None`.
    async fn take(&self, token: &str) -> DomainResult<Option<PendingDraft>>;

    async fn count(&self) -> DomainResult<usize>;
}

/// Outbound mail contract. Implementations report failure as
/// `DomainError::Mail`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()>;
}

/// Storage for uploaded post images.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Saves raw bytes and returns the public reference path for the post.
    async fn store(
        &self,
        original_name: Option<String>,
        content_type: mime::Mime,
        data: bytes::Bytes,
    ) -> DomainResult<String>;
}

/// Source of verification tokens.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> DomainResult<VerificationToken>;
}
