//! Uniform response of the upload endpoint

use aide::OperationOutput;
use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::upload::UploadError;

/// Body of the upload endpoint response
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum UploadResponseBody {
    /// Presigned URL the client must PUT the bytes to
    Success {
        /// Presigned PUT URL, valid for a short window
        #[serde(rename = "uploadURL")]
        upload_url: String,
    },
    /// Message of the error that ended the request
    Failure {
        /// Error message
        error: String,
    },
}

/// Status, headers and body returned for every upload request
#[derive(Debug, Clone)]
pub struct UploadResponse {
    /// `200` on success, `500` on any failure
    pub status: StatusCode,
    /// JSON body
    pub body: UploadResponseBody,
}

impl UploadResponse {
    /// Successful response carrying the presigned URL
    #[must_use]
    pub const fn success(upload_url: String) -> Self {
        Self {
            status: StatusCode::OK,
            body: UploadResponseBody::Success { upload_url },
        }
    }

    /// Failure response carrying the error message
    ///
    /// Every error kind maps to the same status.
    #[must_use]
    pub fn failure(err: &UploadError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: UploadResponseBody::Failure {
                error: err.to_string(),
            },
        }
    }

    /// Headers attached to the response
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        cors_headers()
    }
}

/// Permissive cross-origin headers sent with every response of the upload endpoint
#[must_use]
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

impl IntoResponse for UploadResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers(), Json(self.body)).into_response()
    }
}

impl OperationOutput for UploadResponse {
    type Inner = UploadResponseBody;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<UploadResponseBody>::operation_response(ctx, operation)
    }
}
