//! axum HTTP adapter.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::{router, WebConfig};
pub use state::AppState;
