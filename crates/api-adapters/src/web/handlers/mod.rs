//! # Handlers
//!
//! Each handler translates one HTTP request into one workflow call.

pub mod comments;
pub mod health;
pub mod posts;
pub mod submit;
pub mod verify;
