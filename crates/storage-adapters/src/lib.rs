//! # storage-adapters
//!
//! Implementations of the `PostRepository`, `PendingRegistry` and
//! `MediaStorage` ports.

pub mod media;
pub mod memory;

#[cfg(feature = "media-local")]
pub use media::LocalMediaStorage;
pub use memory::{InMemoryPendingRegistry, InMemoryPostStore};
