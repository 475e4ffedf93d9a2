use std::path::Path;

use mime::Mime;

use crate::error::{ClientError, ClientResult};

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name without any directory, not yet encoded
    pub name: String,
    /// Declared MIME type, sent to the orchestrator and with the bytes
    pub content_type: String,
    /// File content
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Creates a file from bytes already in memory
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, inferring the content type from its extension
    ///
    /// # Errors
    ///
    /// Returns `ClientError::ReadFile` if the file cannot be read
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            content_type: content_type_for(path).to_string(),
            name,
            bytes,
        })
    }

    /// Replaces the inferred content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Content type for a path, by extension
#[must_use]
pub fn content_type_for(path: &Path) -> Mime {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        "pdf" => mime::APPLICATION_PDF,
        "json" => mime::APPLICATION_JSON,
        "txt" => mime::TEXT_PLAIN,
        "csv" => mime::TEXT_CSV,
        "html" | "htm" => mime::TEXT_HTML,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
