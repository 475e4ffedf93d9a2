//! Upload notification publishing
//!
//! This module announces new uploads on a fixed AWS SNS topic. Publishing is
//! fire-and-forget: the message ID is returned but delivery is never confirmed.

mod error;

use std::sync::Arc;

use aws_sdk_sns::Client as SnsClient;

pub use error::{NotificationError, NotificationResult};

/// Notification announcing that an upload URL was issued for a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadNotification {
    /// Storage key of the uploaded file
    pub filename: String,
    /// Email of the uploader
    pub email: String,
}

impl UploadNotification {
    /// Creates a notification for `filename` uploaded by `email`
    #[must_use]
    pub fn new(filename: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            email: email.into(),
        }
    }

    /// Free-text message body published to the topic
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "A new file named {} was uploaded by {}.",
            self.filename, self.email
        )
    }
}

/// Publisher for the upload notification topic
pub struct NotificationPublisher {
    sns_client: Arc<SnsClient>,
    topic_arn: String,
}

impl NotificationPublisher {
    /// Creates a new notification publisher
    ///
    /// # Arguments
    ///
    /// * `sns_client` - Pre-configured SNS client
    /// * `topic_arn` - ARN of the topic receiving upload notifications
    #[must_use]
    pub const fn new(sns_client: Arc<SnsClient>, topic_arn: String) -> Self {
        Self {
            sns_client,
            topic_arn,
        }
    }

    /// Publishes a notification to the topic
    ///
    /// # Returns
    ///
    /// The message ID if successful or an empty string
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the publish operation fails
    pub async fn publish(&self, notification: &UploadNotification) -> NotificationResult<String> {
        let result = self
            .sns_client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(notification.message())
            .send()
            .await?;

        let message_id = result
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default();

        tracing::debug!(
            topic = %self.topic_arn,
            message_id = %message_id,
            "published upload notification"
        );

        Ok(message_id)
    }
}
