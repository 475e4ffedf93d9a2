use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the file or email is missing
pub const MISSING_INPUT_MESSAGE: &str = "Please select a file and enter your email.";
/// Shown for any request or transfer failure
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

/// Errors of the two-step upload
#[derive(Error, Debug)]
pub enum ClientError {
    /// No file name or no email was given
    #[error("Please select a file and enter your email.")]
    MissingInput,

    /// The file could not be read from disk
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The orchestrator could not be reached
    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The orchestrator answered with a non-2xx status
    #[error("Upload request rejected ({status}): {error}")]
    Rejected {
        /// Status returned by the orchestrator
        status: StatusCode,
        /// `error` field of the answer, or its raw body
        error: String,
    },

    /// The orchestrator answer carried no usable `uploadURL`
    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),

    /// Storage did not accept the bytes
    #[error("Transfer to storage failed: {0}")]
    Transfer(String),
}

impl ClientError {
    /// Status line to show the user for this error
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingInput => MISSING_INPUT_MESSAGE,
            _ => UPLOAD_FAILED_MESSAGE,
        }
    }
}

/// Result type of client operations
pub type ClientResult<T> = Result<T, ClientError>;
