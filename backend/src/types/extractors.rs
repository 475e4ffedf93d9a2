//! Custom extractors for the upload endpoint

use std::convert::Infallible;

use aide::operation::OperationInput;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    Json,
};

use crate::upload::UploadRequest;

/// Raw request body, handed to the orchestrator unparsed
///
/// Never rejects: parsing belongs to the upload pipeline, which must check its
/// configuration before looking at the body. A body that cannot be read is
/// treated as missing.
pub struct RawBody(pub Option<Bytes>);

impl RawBody {
    /// Body bytes, `None` when absent or empty
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.0.as_deref().filter(|bytes| !bytes.is_empty())
    }
}

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(Self(Some(bytes))),
            Err(rejection) => {
                tracing::warn!("Failed to read request body: {rejection}");
                Ok(Self(None))
            }
        }
    }
}

impl OperationInput for RawBody {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // The body is documented as the JSON upload request it is expected to be
        Json::<UploadRequest>::operation_input(ctx, operation);
    }
}
