//! Shared fixtures: a fully wired in-memory blog plus HTTP helpers.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use api_adapters::web::{router, AppState, WebConfig};
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use domains::{DomainResult, DraftFields, TokenGenerator, VerificationToken};
use mail_adapters::OutboxMailer;
use services::{seed_sample_posts, RandomTokenGenerator, SubmissionSettings};
use storage_adapters::{InMemoryPendingRegistry, InMemoryPostStore, LocalMediaStorage};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://blog.test";

/// The workspace root, where `views/` and `public/` live.
pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

pub const BOUNDARY: &str = "blogboardtestboundary";

/// Hands out `token-1`, `token-2`, ... so tests can redeem drafts whose
/// mail never went out.
#[derive(Default)]
pub struct SequentialTokens(AtomicUsize);

impl TokenGenerator for SequentialTokens {
    fn generate(&self) -> DomainResult<VerificationToken> {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(VerificationToken::new(format!("token-{n}")))
    }
}

pub struct Harness {
    pub posts: Arc<InMemoryPostStore>,
    pub pending: Arc<InMemoryPendingRegistry>,
    pub outbox: Arc<OutboxMailer>,
    pub state: AppState,
    uploads: TempDir,
}

impl Harness {
    pub async fn new(sample_posts: usize) -> Self {
        Self::with_tokens(sample_posts, Arc::new(RandomTokenGenerator)).await
    }

    pub async fn with_tokens(sample_posts: usize, tokens: Arc<dyn TokenGenerator>) -> Self {
        let posts = Arc::new(InMemoryPostStore::new());
        let pending = Arc::new(InMemoryPendingRegistry::new());
        let outbox = Arc::new(OutboxMailer::new());
        let uploads = tempfile::tempdir().unwrap();

        seed_sample_posts(posts.as_ref(), sample_posts).await.unwrap();

        let media = Arc::new(LocalMediaStorage::new(uploads.path(), "/uploads"));
        let state = AppState::new(
            posts.clone(),
            pending.clone(),
            outbox.clone(),
            media,
            tokens,
            SubmissionSettings {
                public_base_url: BASE_URL.to_owned(),
                mail_timeout: Duration::from_secs(1),
            },
        );

        Self {
            posts,
            pending,
            outbox,
            state,
            uploads,
        }
    }

    pub fn app(&self) -> Router {
        router(
            self.state.clone(),
            &WebConfig {
                views_dir: workspace_root().join("views"),
                static_dir: workspace_root().join("public"),
                upload_dir: self.uploads.path().to_path_buf(),
                ..WebConfig::default()
            },
        )
    }

    pub fn uploads_root(&self) -> &std::path::Path {
        self.uploads.path()
    }

    /// Token carried by the most recent verification mail.
    pub fn last_token(&self) -> String {
        token_from(&self.outbox.last().expect("a verification mail was sent").body)
    }
}

pub fn draft(title: &str) -> DraftFields {
    DraftFields {
        name: Some("Ada".into()),
        email: Some("ada@example.com".into()),
        title: Some(title.into()),
        category: Some("regression".into()),
        description: Some("A short summary.".into()),
        content: Some("Body text.".into()),
    }
}

pub fn token_from(mail_body: &str) -> String {
    mail_body
        .split("token=")
        .nth(1)
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect()
        })
        .expect("mail carries a verification link")
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

pub fn json(body: &Bytes) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_urlencoded(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri);
    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

/// Builds a `POST /api/submit` request with text fields and an optional
/// `(file name, content type, bytes)` image part.
pub fn submit_form(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, data)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/api/submit")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub const FULL_FORM: [(&str, &str); 6] = [
    ("name", "Ada"),
    ("email", "ada@example.com"),
    ("title", "Gradient Descent Explained"),
    ("category", "machine-learning"),
    ("description", "Walking downhill, carefully."),
    ("content", "Long form body."),
];
