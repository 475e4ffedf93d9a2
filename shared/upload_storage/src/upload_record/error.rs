//! Error types for upload record storage operations

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::{put_item::PutItemError, query::QueryError};
use thiserror::Error;

/// Result type for upload record storage operations
pub type UploadRecordStorageResult<T> = Result<T, UploadRecordStorageError>;

/// Errors that can occur during upload record storage operations
#[derive(Error, Debug)]
pub enum UploadRecordStorageError {
    /// Failed to insert upload record into Dynamo DB
    #[error(
        "Failed to insert upload record into DynamoDB: {}",
        DisplayErrorContext(.0)
    )]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to query upload records from Dynamo DB
    #[error(
        "Failed to query upload records from DynamoDB: {}",
        DisplayErrorContext(.0)
    )]
    DynamoDbQueryError(#[from] SdkError<QueryError>),

    /// Serialization error for `serde_dynamo`
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl UploadRecordStorageError {
    /// Message reported by Dynamo DB, falling back to the full error chain
    /// when the request never got a service answer
    #[must_use]
    pub fn service_message(&self) -> String {
        match self {
            Self::DynamoDbPutError(err) => sdk_error_message(err),
            Self::DynamoDbQueryError(err) => sdk_error_message(err),
            Self::SerializationError(message) => message.clone(),
        }
    }
}

fn sdk_error_message<E>(err: &SdkError<E>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    err.message()
        .map_or_else(|| DisplayErrorContext(err).to_string(), ToString::to_string)
}
