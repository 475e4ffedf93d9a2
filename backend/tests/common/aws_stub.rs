use aws_credential_types::Credentials;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_sns::Client as SnsClient;
use axum::{
    http::{header, StatusCode},
    Router,
};
use tokio::net::TcpListener;

/// Serves one canned AWS answer for every request and returns the endpoint URL
pub async fn spawn_aws_stub(
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
) -> String {
    let app = Router::new().fallback(move || async move {
        (status, [(header::CONTENT_TYPE, content_type)], body)
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Dynamo DB client talking to `endpoint` without retries
pub fn stub_dynamodb_client(endpoint: &str) -> DynamoDbClient {
    use aws_sdk_dynamodb::config::{retry::RetryConfig, BehaviorVersion, Region};

    let config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url(endpoint)
        .credentials_provider(Credentials::from_keys("test", "test", None))
        .retry_config(RetryConfig::disabled())
        .build();

    DynamoDbClient::from_conf(config)
}

/// SNS client talking to `endpoint` without retries
pub fn stub_sns_client(endpoint: &str) -> SnsClient {
    use aws_sdk_sns::config::{retry::RetryConfig, BehaviorVersion, Region};

    let config = aws_sdk_sns::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url(endpoint)
        .credentials_provider(Credentials::from_keys("test", "test", None))
        .retry_config(RetryConfig::disabled())
        .build();

    SnsClient::from_conf(config)
}
