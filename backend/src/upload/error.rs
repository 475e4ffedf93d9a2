//! Error types for the upload pipeline

use strum::Display;
use thiserror::Error;

use crate::types::ConfigError;

/// Downstream step of the pipeline that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum UploadStage {
    /// Minting the presigned upload URL
    Presign,
    /// Inserting the upload record
    RecordWrite,
    /// Publishing the upload notification
    Notify,
}

/// Result type for upload pipeline operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can end an upload request
///
/// The `Display` output of every variant is the bare message returned to the caller.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Required deployment configuration is missing
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request body is missing or does not describe an upload
    #[error("{0}")]
    Input(String),

    /// A downstream service call failed
    #[error("{message}")]
    Downstream {
        /// Step that failed
        stage: UploadStage,
        /// Message of the underlying error
        message: String,
    },
}

impl UploadError {
    /// Wraps a downstream failure, keeping only its message
    #[must_use]
    pub fn downstream(stage: UploadStage, err: impl std::fmt::Display) -> Self {
        Self::Downstream {
            stage,
            message: err.to_string(),
        }
    }

    /// Short machine-readable category used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Input(_) => "input",
            Self::Downstream { .. } => "downstream",
        }
    }

    /// Failed downstream step, if any
    #[must_use]
    pub const fn stage(&self) -> Option<UploadStage> {
        match self {
            Self::Downstream { stage, .. } => Some(*stage),
            Self::Config(_) | Self::Input(_) => None,
        }
    }
}
