//! Route table.
//!
//! Page routes serve static HTML from the views directory; the pages fetch
//! their data from the JSON API. Anything unmatched falls through to the
//! static asset directory.

use std::path::PathBuf;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;

use crate::web::handlers::{comments, health, posts, submit, verify};
use crate::web::middleware;
use crate::web::state::AppState;

/// Filesystem and limit settings for the router.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub views_dir: PathBuf,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub upload_url_prefix: String,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            views_dir: PathBuf::from("views"),
            static_dir: PathBuf::from("public"),
            upload_dir: PathBuf::from("public/uploads"),
            upload_url_prefix: "/uploads".to_owned(),
            request_timeout: Duration::from_secs(30),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

const PAGES: [(&str, &str); 7] = [
    ("/", "index.html"),
    ("/about", "about.html"),
    ("/projects", "projects.html"),
    ("/reviews", "reviews.html"),
    ("/submit", "submit.html"),
    ("/verify-success", "verify-success.html"),
    ("/post/{id}", "post.html"),
];

pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/post/{id}", get(posts::get_post))
        .route(
            "/submit",
            post(submit::submit_post).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/verify", get(verify::verify_post))
        .route("/comment/{id}", post(comments::add_comment))
}

/// Builds the full application router with its middleware stack.
pub fn router(state: AppState, config: &WebConfig) -> Router {
    let mut pages = Router::new();
    for (path, file) in PAGES {
        pages = pages.route_service(path, ServeFile::new(config.views_dir.join(file)));
    }

    Router::new()
        .merge(pages)
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics))
        .nest("/api", api_routes(config.max_upload_bytes))
        .nest_service(&config.upload_url_prefix, ServeDir::new(&config.upload_dir))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(middleware::propagate_request_id())
        .layer(middleware::trace_layer())
        .layer(middleware::set_request_id())
        .layer(middleware::cors_policy())
        .with_state(state)
}
