//! Deployment-time configuration of the upload orchestrator

use std::env;

use thiserror::Error;

/// Region of the AWS clients (optional)
pub const AWS_REGION: &str = "AWS_REGION";
/// Bucket receiving the uploaded objects
pub const S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
/// Topic receiving upload notifications
pub const SNS_TOPIC_ARN: &str = "SNS_TOPIC_ARN";
/// Table receiving upload records
pub const DYNAMODB_TABLE_NAME: &str = "DYNAMODB_TABLE_NAME";

/// Required configuration is missing or blank
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required environment variables: {}", .missing.join(", "))]
pub struct ConfigError {
    /// Names of the missing variables, in declaration order
    pub missing: Vec<&'static str>,
}

/// Upload orchestrator configuration, read once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadConfig {
    /// AWS region; the SDK default chain applies when absent
    pub region: Option<String>,
    /// S3 bucket name
    pub bucket_name: String,
    /// SNS topic ARN
    pub topic_arn: String,
    /// Dynamo DB table name
    pub table_name: String,
}

impl UploadConfig {
    /// Reads the configuration from the process environment
    ///
    /// Missing variables are kept as empty strings; call [`Self::validate`] to reject them.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = lookup(AWS_REGION).filter(|value| !value.trim().is_empty());

        Self {
            region,
            bucket_name: lookup(S3_BUCKET_NAME).unwrap_or_default(),
            topic_arn: lookup(SNS_TOPIC_ARN).unwrap_or_default(),
            table_name: lookup(DYNAMODB_TABLE_NAME).unwrap_or_default(),
        }
    }

    /// Ensures every required value is present
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` listing each blank required variable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = [
            (S3_BUCKET_NAME, &self.bucket_name),
            (SNS_TOPIC_ARN, &self.topic_arn),
            (DYNAMODB_TABLE_NAME, &self.table_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { missing })
        }
    }
}
