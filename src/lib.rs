#![deny(missing_docs)]

//! Core library for Unredactor: bounded text previews for batches of uploaded documents.

/// HTTP routing and upload handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Format sniffing, per-format extraction, and batch coordination.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Extraction metrics helpers.
pub mod metrics;
