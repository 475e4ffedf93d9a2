//! S3-based upload storage operations
mod error;

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::{error::DisplayErrorContext, presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};

pub use error::{BucketError, BucketResult};

/// Domain under which buckets serve their objects publicly
pub const PUBLIC_STORAGE_DOMAIN: &str = "s3.amazonaws.com";

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for PUT operations
    pub url: String,
    /// UTC instant when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Canonical public URL of `key` in `bucket_name`
///
/// The key is used verbatim, exactly as it was used to store the object.
#[must_use]
pub fn public_object_url(bucket_name: &str, key: &str) -> String {
    format!("https://{bucket_name}.{PUBLIC_STORAGE_DOMAIN}/{key}")
}

/// Upload storage client for S3 operations
pub struct MediaStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    presigned_url_expiry_secs: u64,
}

impl MediaStorage {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name receiving uploads
    /// * `presigned_url_expiry_secs` - Validity window of presigned URLs in seconds
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket_name: String,
        presigned_url_expiry_secs: u64,
    ) -> Self {
        Self {
            s3_client,
            bucket_name,
            presigned_url_expiry_secs,
        }
    }

    /// Bucket receiving the uploads
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Generates a presigned URL for PUT operations
    ///
    /// The signature covers the content type, so the uploader must send the
    /// same `Content-Type` header with the object bytes.
    ///
    /// # Arguments
    ///
    /// * `key` - Object key, used verbatim
    /// * `content_type` - MIME type declared by the uploader
    ///
    /// # Errors
    ///
    /// Returns `BucketError::S3Error` if presigned URL generation fails
    /// Returns `BucketError::ConfigError` if presigning config creation fails
    pub async fn generate_presigned_put_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> BucketResult<PresignedUrl> {
        let expires_in = Duration::from_secs(self.presigned_url_expiry_secs);

        let presigned_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_url = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .presigned(presigned_config)
            .await
            .map_err(|e| {
                BucketError::S3Error(format!(
                    "Failed to generate presigned URL: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let expires_at: DateTime<Utc> = Utc::now() + expires_in;

        Ok(PresignedUrl {
            url: presigned_url.uri().to_string(),
            expires_at,
        })
    }
}
