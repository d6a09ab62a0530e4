//! In-memory `PendingRegistry` backed by a `DashMap`.
//!
//! `take` is a single `remove`, so a token can be redeemed exactly once even
//! when two requests race on it.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{DomainError, DomainResult, PendingDraft, PendingRegistry, VerificationToken};
use tracing::debug;

#[derive(Debug, Default)]
pub struct InMemoryPendingRegistry {
    drafts: DashMap<String, PendingDraft>,
}

impl InMemoryPendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PendingRegistry for InMemoryPendingRegistry {
    async fn stage(&self, token: VerificationToken, draft: PendingDraft) -> DomainResult<()> {
        match self.drafts.entry(token.as_str().to_owned()) {
            Entry::Occupied(_) => Err(DomainError::Internal(
                "verification token collision".to_owned(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(draft);
                debug!("draft staged");
                Ok(())
            }
        }
    }

    async fn take(&self, token: &str) -> DomainResult<Option<PendingDraft>> {
        Ok(self.drafts.remove(token).map(|(_, draft)| draft))
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.drafts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{Category, NewPost, Submitter};
    use std::sync::Arc;

    fn draft(title: &str) -> PendingDraft {
        PendingDraft {
            submitter: Submitter {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            },
            post: NewPost {
                title: title.into(),
                date: Utc::now(),
                category: Category::DataAnalytics,
                description: "d".into(),
                content: "c".into(),
                image: None,
                verified: false,
            },
        }
    }

    #[tokio::test]
    async fn token_is_single_use() {
        let registry = InMemoryPendingRegistry::new();
        registry
            .stage(VerificationToken::new("t1"), draft("x"))
            .await
            .unwrap();

        assert!(registry.take("t1").await.unwrap().is_some());
        assert!(registry.take("t1").await.unwrap().is_none());
        assert_eq!(registry.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reused_token_is_refused() {
        let registry = InMemoryPendingRegistry::new();
        registry
            .stage(VerificationToken::new("t1"), draft("first"))
            .await
            .unwrap();
        let err = registry
            .stage(VerificationToken::new("t1"), draft("second"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));

        let kept = registry.take("t1").await.unwrap().unwrap();
        assert_eq!(kept.post.title, "first");
    }

    #[tokio::test]
    async fn same_title_can_be_pending_twice() {
        let registry = InMemoryPendingRegistry::new();
        registry.stage(VerificationToken::new("a"), draft("dup")).await.unwrap();
        registry.stage(VerificationToken::new("b"), draft("dup")).await.unwrap();
        assert_eq!(registry.count().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_takes_yield_one_winner() {
        let registry = Arc::new(InMemoryPendingRegistry::new());
        registry.stage(VerificationToken::new("race"), draft("x")).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.take("race").await.unwrap().is_some() })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
