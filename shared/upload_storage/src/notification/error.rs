use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sns::operation::publish::PublishError;
use thiserror::Error;

/// Result type alias for notification operations
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Error types for notification operations
#[derive(Error, Debug)]
pub enum NotificationError {
    /// Error publishing message to SNS
    #[error(
        "Failed to publish notification to SNS: {}",
        DisplayErrorContext(.0)
    )]
    SnsPublishError(#[from] SdkError<PublishError>),
}

impl NotificationError {
    /// Message reported by SNS, falling back to the full error chain when the
    /// request never got a service answer
    #[must_use]
    pub fn service_message(&self) -> String {
        match self {
            Self::SnsPublishError(err) => err
                .message()
                .map_or_else(|| DisplayErrorContext(err).to_string(), ToString::to_string),
        }
    }

    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::SnsPublishError(SdkError::ServiceError(err)) => {
                err.raw().status().as_u16() >= 500
            }
            Self::SnsPublishError(_) => false,
        }
    }
}
