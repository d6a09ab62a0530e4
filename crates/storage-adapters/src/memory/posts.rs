//! In-memory `PostRepository`.
//!
//! One `RwLock` guards the whole collection. `append` performs the title
//! check and the id assignment under the same write guard, so concurrent
//! publishers can neither share an id nor slip in a duplicate title.

use async_trait::async_trait;
use domains::{Comment, DomainError, DomainResult, NewPost, Post, PostId, PostRepository};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostStore {
    async fn list_all(&self) -> DomainResult<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn title_exists(&self, title: &str) -> DomainResult<bool> {
        Ok(self.posts.read().await.iter().any(|p| p.has_title(title)))
    }

    async fn append(&self, post: NewPost) -> DomainResult<Post> {
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.has_title(&post.title)) {
            return Err(DomainError::DuplicateTitle(post.title));
        }

        // Posts are never removed, so the length is the next free id.
        let id = PostId(posts.len() as u64);
        let post = post.into_post(id);
        posts.push(post.clone());
        debug!(post_id = %id, "post appended");

        Ok(post)
    }

    async fn add_comment(&self, id: PostId, comment: Comment) -> DomainResult<()> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "post",
                id: id.to_string(),
            })?;
        post.comments.push(comment);
        Ok(())
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.posts.read().await.len())
    }
}
