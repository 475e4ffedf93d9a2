//! Upload Backend service
//!
//! Issues presigned S3 upload URLs, records each upload in Dynamo DB and
//! announces it on an SNS topic.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// S3-based upload storage
pub mod media_storage;

/// HTTP routes
pub mod routes;

/// Server setup and lifecycle
pub mod server;

/// Configuration, response and extractor types
pub mod types;

/// Upload orchestration pipeline
pub mod upload;
