//! Upload orchestration
//!
//! Turns an upload intent into a presigned URL the client can PUT the bytes to,
//! an upload record in the metadata table and a notification on the upload topic.
//!
//! The pipeline is strictly sequential and stops at the first failure:
//! 1. Validate the deployment configuration
//! 2. Parse the request body
//! 3. Presign a PUT for the object
//! 4. Insert the upload record
//! 5. Publish the notification
//!
//! Nothing is retried and nothing is rolled back. A failed notification leaves
//! the record from step 4 in place.

mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
mod services;

use std::sync::Arc;

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use upload_storage::{notification::UploadNotification, upload_record::UploadRecord};
use validator::{Validate, ValidationErrors};

pub use error::{UploadError, UploadResult, UploadStage};
pub use services::{UploadNotifier, UploadRecordStore, UploadUrlSigner};

use crate::media_storage::{public_object_url, PresignedUrl};
use crate::types::{UploadConfig, UploadResponse};

/// Upload intent sent by the client
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Object key in the bucket, used verbatim
    #[validate(length(min = 1, message = "filename must not be empty"))]
    pub filename: String,
    /// MIME type the client will send with the bytes
    pub content_type: String,
    /// Uploader email, not validated
    pub email: String,
}

impl UploadRequest {
    /// Parses and validates a raw request body
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Input` if the body is missing, is not valid JSON,
    /// lacks a required string field or carries an empty filename
    pub fn parse(body: Option<&[u8]>) -> UploadResult<Self> {
        let body = body
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| UploadError::Input("Request body is missing".to_string()))?;

        let request: Self =
            serde_json::from_slice(body).map_err(|e| UploadError::Input(e.to_string()))?;

        request
            .validate()
            .map_err(|errors| UploadError::Input(first_validation_message(&errors)))?;

        Ok(request)
    }
}

/// Uses the custom message of the first failing field when there is one
fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .find_map(|field| field.first())
        .and_then(|error| error.message.clone())
        .map_or_else(|| errors.to_string(), std::borrow::Cow::into_owned)
}

/// Coordinates the downstream services for one upload request at a time
///
/// Holds no per-request state; one instance serves every request.
pub struct UploadOrchestrator {
    config: Arc<UploadConfig>,
    signer: Arc<dyn UploadUrlSigner>,
    records: Arc<dyn UploadRecordStore>,
    notifier: Arc<dyn UploadNotifier>,
}

impl UploadOrchestrator {
    /// Creates a new orchestrator
    ///
    /// # Arguments
    ///
    /// * `config` - Deployment configuration, validated on every request
    /// * `signer` - Presigned URL minting (S3)
    /// * `records` - Upload record table (Dynamo DB)
    /// * `notifier` - Upload topic (SNS)
    #[must_use]
    pub fn new(
        config: Arc<UploadConfig>,
        signer: Arc<dyn UploadUrlSigner>,
        records: Arc<dyn UploadRecordStore>,
        notifier: Arc<dyn UploadNotifier>,
    ) -> Self {
        Self {
            config,
            signer,
            records,
            notifier,
        }
    }

    /// Handles one upload request end to end
    ///
    /// Never fails: every error is logged and turned into a 500 response
    /// carrying the error message.
    #[instrument(skip_all)]
    pub async fn request_upload(&self, body: Option<&[u8]>) -> UploadResponse {
        match self.run(body).await {
            Ok(presigned) => {
                tracing::info!(
                    expires_at = %presigned.expires_at.to_rfc3339(),
                    "issued presigned upload URL"
                );
                UploadResponse::success(presigned.url)
            }
            Err(err) => {
                tracing::error!(
                    kind = err.kind(),
                    stage = ?err.stage(),
                    "upload request failed: {err}"
                );
                UploadResponse::failure(&err)
            }
        }
    }

    async fn run(&self, body: Option<&[u8]>) -> UploadResult<PresignedUrl> {
        self.config.validate()?;

        let request = UploadRequest::parse(body)?;
        tracing::debug!(
            filename = %request.filename,
            content_type = %request.content_type,
            "parsed upload request"
        );

        let presigned = self
            .signer
            .presign_put(&request.filename, &request.content_type)
            .await?;

        let record = UploadRecord::new(
            &request.email,
            public_object_url(&self.config.bucket_name, &request.filename),
            Utc::now(),
        );
        self.records.insert(&record).await?;

        let notification = UploadNotification::new(request.filename, request.email);
        self.notifier.publish(&notification).await?;

        Ok(presigned)
    }
}
