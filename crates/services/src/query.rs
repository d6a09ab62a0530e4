//! # Query Engine
//!
//! Read side of the blog: category and free-text filtering over published
//! posts.

use std::sync::Arc;

use domains::{DomainError, DomainResult, Post, PostId, PostRepository, ALL_CATEGORIES};

/// Optional filters from the listing page. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct PostQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl PostQuery {
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_owned),
            search: search.map(str::to_owned),
        }
    }
}

pub struct PostQueryService {
    posts: Arc<dyn PostRepository>,
}

impl PostQueryService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Lists verified posts matching every supplied filter, in insertion
    /// order. No match is an empty list.
    pub async fn query(&self, query: &PostQuery) -> DomainResult<Vec<Post>> {
        let posts = self.posts.list_all().await?;
        Ok(filter_posts(posts, query))
    }

    /// Fetches a single published post.
    pub async fn get(&self, id: PostId) -> DomainResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .filter(|p| p.verified)
            .ok_or_else(|| DomainError::NotFound {
                entity: "post",
                id: id.to_string(),
            })
    }
}

/// Applies the listing filters to an already loaded collection.
pub fn filter_posts(posts: Vec<Post>, query: &PostQuery) -> Vec<Post> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
    let needle = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    posts
        .into_iter()
        .filter(|p| p.verified)
        .filter(|p| category.map_or(true, |c| p.category.as_str() == c))
        .filter(|p| {
            needle.as_deref().map_or(true, |n| {
                p.title.to_lowercase().contains(n) || p.description.to_lowercase().contains(n)
            })
        })
        .collect()
}
