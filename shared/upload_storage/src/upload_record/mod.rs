//! Upload record storage integration using Dynamo DB
//!
//! Every upload intent that received a presigned URL leaves one record behind.
//! Records are append-only: this crate never updates or deletes them.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoDbClient};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

pub use error::{UploadRecordStorageError, UploadRecordStorageResult};

/// Attribute names for the upload records table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum UploadRecordAttribute {
    /// Uploader email (Partition Key)
    Email,
    /// Public URL of the uploaded object
    Url,
    /// ISO-8601 creation timestamp (Sort Key)
    Datetime,
}

/// Upload record data structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadRecord {
    /// Email of the uploader, unvalidated
    pub email: String,
    /// Canonical public URL of the object, not the presigned URL
    pub url: String,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub datetime: String,
}

impl UploadRecord {
    /// Creates a record stamped with `created_at`
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            url: url.into(),
            datetime: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Upload record storage client for Dynamo DB operations
pub struct UploadRecordStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl UploadRecordStorage {
    /// Creates a new upload record storage client
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured Dynamo DB client
    /// * `table_name` - Dynamo DB table name for upload records
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Inserts a new upload record
    ///
    /// No condition expression is attached: inserting the same file twice
    /// produces two records distinguished by their timestamps.
    ///
    /// # Errors
    ///
    /// Returns `UploadRecordStorageError` if serialization or the Dynamo DB operation fails
    pub async fn insert(&self, record: &UploadRecord) -> UploadRecordStorageResult<()> {
        let item = serde_dynamo::to_item(record)
            .map_err(|e| UploadRecordStorageError::SerializationError(e.to_string()))?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        tracing::debug!(table = %self.table_name, url = %record.url, "inserted upload record");

        Ok(())
    }

    /// Lists every record created by `email`, oldest first
    ///
    /// # Errors
    ///
    /// Returns `UploadRecordStorageError` if the Dynamo DB query or deserialization fails
    pub async fn list_by_email(&self, email: &str) -> UploadRecordStorageResult<Vec<UploadRecord>> {
        let mut records = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let response = self
                .dynamodb_client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("#email = :email")
                .expression_attribute_names("#email", UploadRecordAttribute::Email.to_string())
                .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;

            let page: Vec<UploadRecord> = serde_dynamo::from_items(response.items().to_vec())
                .map_err(|e| UploadRecordStorageError::SerializationError(e.to_string()))?;
            records.extend(page);

            match response.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }

        Ok(records)
    }
}
