//! Storage services for the upload backend
//!
//! This crate wraps the two managed services the upload orchestrator writes to:
//! the Dynamo DB table holding upload records and the SNS topic announcing new uploads.

pub mod notification;
pub mod upload_record;
