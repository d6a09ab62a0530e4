//! Process-local adapters. Nothing here survives a restart.

mod pending;
mod posts;

pub use pending::InMemoryPendingRegistry;
pub use posts::InMemoryPostStore;
