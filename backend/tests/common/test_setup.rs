use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    server,
    types::{Environment, UploadConfig},
    upload::{
        mock::{orchestrator_with, MockUploadServices},
        UploadOrchestrator,
    },
};
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "test-bucket";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Configuration with every required value present
pub fn valid_config() -> UploadConfig {
    UploadConfig {
        region: Some("us-east-1".to_string()),
        bucket_name: TEST_BUCKET.to_string(),
        topic_arn: "arn:aws:sns:us-east-1:000000000000:uploads".to_string(),
        table_name: "upload-records".to_string(),
    }
}

/// Router wired to in-memory downstream services
pub struct TestSetup {
    pub router: Router,
    pub services: Arc<MockUploadServices>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_services(MockUploadServices::new(TEST_BUCKET), valid_config())
    }

    pub fn with_services(services: MockUploadServices, config: UploadConfig) -> Self {
        setup_test_env();

        let services = Arc::new(services);
        let orchestrator = orchestrator_with(&services, config);
        Self::with_orchestrator(services, orchestrator)
    }

    /// Router around a custom orchestrator, `services` being whatever mocks it uses
    pub fn with_orchestrator(
        services: Arc<MockUploadServices>,
        orchestrator: UploadOrchestrator,
    ) -> Self {
        setup_test_env();

        let environment = Environment::Development {
            presign_expiry_override: None,
        };

        Self {
            router: server::router(environment, Arc::new(orchestrator)),
            services,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_raw_post_request(
        &self,
        route: &str,
        body: impl Into<Body>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .body(body.into())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_request(
        &self,
        method: &str,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method(method)
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
