use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use tracing::instrument;

use crate::{
    types::{cors_headers, RawBody, UploadResponse},
    upload::UploadOrchestrator,
};

/// Requests a presigned URL for uploading a file to S3
///
/// Runs the upload pipeline:
/// 1. Validates the deployment configuration
/// 2. Parses `{filename, contentType, email}` from the body
/// 3. Presigns a PUT for the object, valid for 60 seconds by default
/// 4. Records the upload in Dynamo DB
/// 5. Publishes an upload notification to SNS
///
/// # Returns
///
/// `200 {"uploadURL": ...}` once every step succeeded, otherwise
/// `500 {"error": ...}` with the message of the first failure. Both carry
/// permissive CORS headers.
#[instrument(skip_all)]
pub async fn create_upload(
    Extension(orchestrator): Extension<Arc<UploadOrchestrator>>,
    body: RawBody,
) -> UploadResponse {
    orchestrator.request_upload(body.as_bytes()).await
}

/// Empty `204` answer to CORS preflight requests
pub struct CorsPreflight;

impl IntoResponse for CorsPreflight {
    fn into_response(self) -> Response {
        (StatusCode::NO_CONTENT, cors_headers()).into_response()
    }
}

impl OperationOutput for CorsPreflight {
    type Inner = ();
}

/// Answers the browser preflight for the upload endpoint
#[allow(clippy::unused_async)]
pub async fn preflight() -> CorsPreflight {
    CorsPreflight
}
