use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::file::UploadFile;

/// Characters escaped when encoding a filename, everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Shown once the bytes reached storage
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload successful!";

/// Percent-encodes a filename the way browsers encode URI components
#[must_use]
pub fn encode_filename(name: &str) -> String {
    utf8_percent_encode(name, FILENAME_ENCODE_SET).to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'a> {
    filename: &'a str,
    content_type: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadUrlResponse {
    #[serde(rename = "uploadURL")]
    upload_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Result of a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Encoded filename, which is the object key
    pub filename: String,
    /// Presigned URL the bytes were sent to
    pub upload_url: String,
}

impl UploadOutcome {
    /// Status line to show the user
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn message(&self) -> &'static str {
        UPLOAD_SUCCESS_MESSAGE
    }
}

/// Talks to the upload orchestrator, then sends the bytes straight to storage
#[derive(Clone)]
pub struct UploadClient {
    api_url: String,
    http: reqwest::Client,
}

impl UploadClient {
    /// Creates a client posting upload requests to `api_url`
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_http(api_url, reqwest::Client::new())
    }

    /// Creates a client reusing an existing HTTP client
    #[must_use]
    pub fn with_http(api_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            api_url: api_url.into(),
            http,
        }
    }

    /// Requests a presigned URL for `file` and PUTs its bytes to it
    ///
    /// # Errors
    ///
    /// - `ClientError::MissingInput` if the file has no name or `email` is empty
    /// - `ClientError::Request` if the orchestrator cannot be reached
    /// - `ClientError::Rejected` if the orchestrator answers with a non-2xx status
    /// - `ClientError::InvalidResponse` if the answer carries no `uploadURL`
    /// - `ClientError::Transfer` if storage does not accept the bytes
    pub async fn upload(&self, file: &UploadFile, email: &str) -> ClientResult<UploadOutcome> {
        if file.name.is_empty() || email.is_empty() {
            return Err(ClientError::MissingInput);
        }

        let filename = encode_filename(&file.name);
        let upload_url = self
            .request_upload_url(&filename, &file.content_type, email)
            .await?;

        tracing::debug!(filename = %filename, "Received presigned upload URL");

        self.transfer(&upload_url, file).await?;

        tracing::info!(filename = %filename, size = file.bytes.len(), "Upload completed");

        Ok(UploadOutcome {
            filename,
            upload_url,
        })
    }

    async fn request_upload_url(
        &self,
        filename: &str,
        content_type: &str,
        email: &str,
    ) -> ClientResult<String> {
        let response = self
            .http
            .post(&self.api_url)
            .json(&UploadRequest {
                filename,
                content_type,
                email,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let error = serde_json::from_str::<ErrorResponse>(&body)
                .map_or(body, |response| response.error);
            return Err(ClientError::Rejected { status, error });
        }

        serde_json::from_str::<UploadUrlResponse>(&body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?
            .upload_url
            .ok_or_else(|| ClientError::InvalidResponse("uploadURL missing".to_string()))
    }

    async fn transfer(&self, upload_url: &str, file: &UploadFile) -> ClientResult<()> {
        let response = self
            .http
            .put(upload_url)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.bytes.clone())
            .send()
            .await
            .map_err(|e| ClientError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Transfer(format!("storage returned {status}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_filename_keeps_unreserved_characters() {
        assert_eq!(encode_filename("cat.png"), "cat.png");
        assert_eq!(encode_filename("A-z_0.9!~*'()"), "A-z_0.9!~*'()");
    }

    #[test]
    fn test_encode_filename_escapes_reserved_characters() {
        assert_eq!(encode_filename("my cat.png"), "my%20cat.png");
        assert_eq!(encode_filename("a/b?c=d&e#f"), "a%2Fb%3Fc%3Dd%26e%23f");
        assert_eq!(encode_filename("100%.txt"), "100%25.txt");
    }

    #[test]
    fn test_encode_filename_escapes_utf8() {
        assert_eq!(encode_filename("café.png"), "caf%C3%A9.png");
    }

    #[tokio::test]
    async fn test_upload_requires_file_name_and_email() {
        let client = UploadClient::new("http://127.0.0.1:9/uploads");

        let nameless = UploadFile::new("", "image/png", b"x".to_vec());
        let err = client.upload(&nameless, "a@b.com").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingInput));
        assert_eq!(err.user_message(), "Please select a file and enter your email.");

        let file = UploadFile::new("cat.png", "image/png", b"x".to_vec());
        let err = client.upload(&file, "").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingInput));
    }
}
