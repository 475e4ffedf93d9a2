//! Downstream services used by the upload pipeline
//!
//! Each trait covers one managed service. The AWS-backed implementations tag
//! their failures with the pipeline stage they belong to.

use upload_storage::{
    notification::{NotificationPublisher, UploadNotification},
    upload_record::{UploadRecord, UploadRecordStorage},
};

use super::{UploadError, UploadStage};
use crate::media_storage::{MediaStorage, PresignedUrl};

/// Mints presigned upload URLs
#[async_trait::async_trait]
pub trait UploadUrlSigner: Send + Sync {
    /// Presigns a PUT of object `key` carrying `content_type`
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, UploadError>;
}

/// Persists upload records
#[async_trait::async_trait]
pub trait UploadRecordStore: Send + Sync {
    /// Inserts one record, unconditionally
    async fn insert(&self, record: &UploadRecord) -> Result<(), UploadError>;
}

/// Announces uploads
#[async_trait::async_trait]
pub trait UploadNotifier: Send + Sync {
    /// Publishes one notification and returns its message ID
    async fn publish(&self, notification: &UploadNotification) -> Result<String, UploadError>;
}

#[async_trait::async_trait]
impl UploadUrlSigner for MediaStorage {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, UploadError> {
        self.generate_presigned_put_url(key, content_type)
            .await
            .map_err(|e| UploadError::downstream(UploadStage::Presign, e))
    }
}

#[async_trait::async_trait]
impl UploadRecordStore for UploadRecordStorage {
    async fn insert(&self, record: &UploadRecord) -> Result<(), UploadError> {
        Self::insert(self, record).await.map_err(|e| {
            tracing::warn!("Upload record write failed: {e}");
            UploadError::downstream(UploadStage::RecordWrite, e.service_message())
        })
    }
}

#[async_trait::async_trait]
impl UploadNotifier for NotificationPublisher {
    async fn publish(&self, notification: &UploadNotification) -> Result<String, UploadError> {
        Self::publish(self, notification).await.map_err(|e| {
            if e.is_upstream_error() {
                tracing::warn!("SNS returned a server error: {e}");
            } else {
                tracing::warn!("Upload notification failed: {e}");
            }
            UploadError::downstream(UploadStage::Notify, e.service_message())
        })
    }
}
