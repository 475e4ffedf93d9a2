use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sns::Client as SnsClient;
use backend::{
    media_storage::MediaStorage,
    server,
    types::{Environment, UploadConfig},
    upload::UploadOrchestrator,
};
use tracing_subscriber::{fmt, EnvFilter};
use upload_storage::{notification::NotificationPublisher, upload_record::UploadRecordStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A local .env is optional; deployed environments set real variables
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Use JSON format for staging/production, regular format for development
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(UploadConfig::from_env());
    if let Err(err) = config.validate() {
        // Keep serving: every upload request reports the same error until it is fixed
        tracing::error!("Invalid configuration: {err}");
    }

    let region = config.region.as_deref();
    let aws_config = environment.aws_config(region).await;

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(region).await,
    ));
    let media_storage = Arc::new(MediaStorage::new(
        s3_client,
        config.bucket_name.clone(),
        environment.presigned_url_expiry_secs(),
    ));

    let upload_records = Arc::new(UploadRecordStorage::new(
        Arc::new(DynamoDbClient::new(&aws_config)),
        config.table_name.clone(),
    ));

    let notification_publisher = Arc::new(NotificationPublisher::new(
        Arc::new(SnsClient::new(&aws_config)),
        config.topic_arn.clone(),
    ));

    tracing::info!(
        bucket = media_storage.bucket_name(),
        table = %config.table_name,
        topic = %config.topic_arn,
        presign_expiry_secs = environment.presigned_url_expiry_secs(),
        "Upload orchestrator configured"
    );

    let orchestrator = Arc::new(UploadOrchestrator::new(
        config,
        media_storage,
        upload_records,
        notification_publisher,
    ));

    server::start(environment, orchestrator).await
}
