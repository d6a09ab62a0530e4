//! # api-adapters
//!
//! Inbound adapters. The axum surface lives behind the `web-axum` feature;
//! metrics are always available so other transports can record outcomes.

pub mod metrics;

#[cfg(feature = "web-axum")]
pub mod web;

pub use metrics::Metrics;
