//! Client for the upload backend
//!
//! Asks the orchestrator for a presigned URL, then PUTs the file bytes
//! directly to storage with the declared content type.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod client;
mod error;
mod file;

pub use client::{encode_filename, UploadClient, UploadOutcome, UPLOAD_SUCCESS_MESSAGE};
pub use error::{ClientError, ClientResult, MISSING_INPUT_MESSAGE, UPLOAD_FAILED_MESSAGE};
pub use file::{content_type_for, UploadFile};
