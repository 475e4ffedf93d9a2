//! In-memory stand-ins for the downstream services

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use upload_storage::{notification::UploadNotification, upload_record::UploadRecord};

use super::{
    UploadError, UploadNotifier, UploadOrchestrator, UploadRecordStore, UploadStage,
    UploadUrlSigner,
};
use crate::media_storage::{PresignedUrl, PUBLIC_STORAGE_DOMAIN};
use crate::types::UploadConfig;

/// Downstream call observed by [`MockUploadServices`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownstreamCall {
    /// Presign requested for a key and content type
    Presign {
        /// Object key
        key: String,
        /// Declared content type
        content_type: String,
    },
    /// Record insert attempted
    RecordWrite(UploadRecord),
    /// Notification publish attempted
    Notify(String),
}

#[derive(Default)]
struct MockState {
    calls: Vec<DownstreamCall>,
    records: Vec<UploadRecord>,
    notifications: Vec<String>,
}

/// Builds an orchestrator whose three downstream services are all `services`
#[must_use]
pub fn orchestrator_with(
    services: &Arc<MockUploadServices>,
    config: UploadConfig,
) -> UploadOrchestrator {
    UploadOrchestrator::new(
        Arc::new(config),
        services.clone(),
        services.clone(),
        services.clone(),
    )
}

/// Records every downstream call and optionally fails one stage
pub struct MockUploadServices {
    bucket_name: String,
    failing_stage: Option<(UploadStage, String)>,
    notify_delay: Option<Duration>,
    state: Mutex<MockState>,
}

impl MockUploadServices {
    /// Creates services that succeed, signing URLs for `bucket_name`
    #[must_use]
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            failing_stage: None,
            notify_delay: None,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Makes `stage` fail with `message`
    #[must_use]
    pub fn failing_at(mut self, stage: UploadStage, message: impl Into<String>) -> Self {
        self.failing_stage = Some((stage, message.into()));
        self
    }

    /// Makes every publish wait `delay` before answering
    #[must_use]
    pub const fn with_notify_delay(mut self, delay: Duration) -> Self {
        self.notify_delay = Some(delay);
        self
    }

    /// Every attempted call, in order
    #[must_use]
    pub fn calls(&self) -> Vec<DownstreamCall> {
        self.lock().calls.clone()
    }

    /// Records that were stored successfully
    #[must_use]
    pub fn records(&self) -> Vec<UploadRecord> {
        self.lock().records.clone()
    }

    /// Notifications that were published successfully
    #[must_use]
    pub fn notifications(&self) -> Vec<String> {
        self.lock().notifications.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check(&self, stage: UploadStage) -> Result<(), UploadError> {
        match &self.failing_stage {
            Some((failing, message)) if *failing == stage => {
                Err(UploadError::downstream(stage, message))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl UploadUrlSigner for MockUploadServices {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, UploadError> {
        self.lock().calls.push(DownstreamCall::Presign {
            key: key.to_string(),
            content_type: content_type.to_string(),
        });
        self.check(UploadStage::Presign)?;

        Ok(PresignedUrl {
            url: format!(
                "https://{}.{PUBLIC_STORAGE_DOMAIN}/{key}?X-Amz-Expires=60&X-Amz-Signature=mock",
                self.bucket_name
            ),
            expires_at: Utc::now() + Duration::from_secs(60),
        })
    }
}

#[async_trait::async_trait]
impl UploadRecordStore for MockUploadServices {
    async fn insert(&self, record: &UploadRecord) -> Result<(), UploadError> {
        self.lock()
            .calls
            .push(DownstreamCall::RecordWrite(record.clone()));
        self.check(UploadStage::RecordWrite)?;

        self.lock().records.push(record.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl UploadNotifier for MockUploadServices {
    async fn publish(&self, notification: &UploadNotification) -> Result<String, UploadError> {
        let message = notification.message();
        self.lock().calls.push(DownstreamCall::Notify(message.clone()));
        if let Some(delay) = self.notify_delay {
            tokio::time::sleep(delay).await;
        }
        self.check(UploadStage::Notify)?;

        let mut state = self.lock();
        state.notifications.push(message);
        Ok(format!("mock-message-{}", state.notifications.len()))
    }
}
