//! Media storage adapters for uploaded post images.

#[cfg(feature = "media-local")]
mod local;

#[cfg(feature = "media-local")]
pub use local::LocalMediaStorage;
