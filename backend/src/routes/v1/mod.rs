/// Upload request and CORS preflight handlers
pub mod uploads;

use aide::axum::{routing::post, ApiRouter};

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new().api_route(
        "/v1/uploads",
        post(uploads::create_upload).options(uploads::preflight),
    )
}
