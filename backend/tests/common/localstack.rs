use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sns::Client as SnsClient;
use axum::Router;
use backend::{
    media_storage::MediaStorage,
    server,
    types::{Environment, UploadConfig},
    upload::UploadOrchestrator,
};
use upload_storage::{
    notification::NotificationPublisher,
    upload_record::{UploadRecordAttribute, UploadRecordStorage},
};
use uuid::Uuid;

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

async fn localstack_config() -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(Credentials::from_keys("test", "test", None))
        .load()
        .await
}

/// Real bucket, table and topic on LocalStack, removed on drop
pub struct LocalStackSetup {
    pub router: Router,
    pub config: UploadConfig,
    pub s3_client: Arc<S3Client>,
    pub upload_records: Arc<UploadRecordStorage>,
    dynamodb_client: Arc<DynamoDbClient>,
    sns_client: Arc<SnsClient>,
}

impl LocalStackSetup {
    pub async fn new() -> Self {
        super::setup_test_env();

        let sdk_config = localstack_config().await;
        let suffix = Uuid::new_v4().simple().to_string();

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();
        let s3_client = Arc::new(S3Client::from_conf(s3_config));
        let dynamodb_client = Arc::new(DynamoDbClient::new(&sdk_config));
        let sns_client = Arc::new(SnsClient::new(&sdk_config));

        let bucket_name = format!("test-uploads-{suffix}");
        s3_client
            .create_bucket()
            .bucket(&bucket_name)
            .send()
            .await
            .expect("Failed to create test bucket");

        let table_name = format!("test-upload-records-{suffix}");
        create_upload_records_table(&dynamodb_client, &table_name).await;

        let topic_arn = sns_client
            .create_topic()
            .name(format!("test-uploads-{suffix}"))
            .send()
            .await
            .expect("Failed to create test topic")
            .topic_arn()
            .expect("Topic ARN missing")
            .to_string();

        let config = UploadConfig {
            region: Some(TEST_REGION.to_string()),
            bucket_name,
            topic_arn,
            table_name,
        };

        let upload_records = Arc::new(UploadRecordStorage::new(
            dynamodb_client.clone(),
            config.table_name.clone(),
        ));

        let mut setup = Self {
            router: Router::new(),
            config,
            s3_client,
            upload_records,
            dynamodb_client,
            sns_client,
        };
        setup.router = setup.router_for(setup.config.clone());
        setup
    }

    /// Router backed by the LocalStack clients, using `config` for names
    pub fn router_for(&self, config: UploadConfig) -> Router {
        let environment = Environment::Development {
            presign_expiry_override: None,
        };

        let media_storage = Arc::new(MediaStorage::new(
            self.s3_client.clone(),
            config.bucket_name.clone(),
            environment.presigned_url_expiry_secs(),
        ));
        let upload_records = Arc::new(UploadRecordStorage::new(
            self.dynamodb_client.clone(),
            config.table_name.clone(),
        ));
        let notification_publisher = Arc::new(NotificationPublisher::new(
            self.sns_client.clone(),
            config.topic_arn.clone(),
        ));

        let orchestrator = Arc::new(UploadOrchestrator::new(
            Arc::new(config),
            media_storage,
            upload_records,
            notification_publisher,
        ));

        server::router(environment, orchestrator)
    }
}

async fn create_upload_records_table(client: &DynamoDbClient, table_name: &str) {
    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(UploadRecordAttribute::Email.to_string())
                .attribute_type(ScalarAttributeType::S)
                .build()
                .unwrap(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(UploadRecordAttribute::Datetime.to_string())
                .attribute_type(ScalarAttributeType::S)
                .build()
                .unwrap(),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(UploadRecordAttribute::Email.to_string())
                .key_type(KeyType::Hash)
                .build()
                .unwrap(),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(UploadRecordAttribute::Datetime.to_string())
                .key_type(KeyType::Range)
                .build()
                .unwrap(),
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .expect("Failed to create test table");

    // Wait for table to be ready
    tokio::time::sleep(Duration::from_millis(100)).await;
}

impl Drop for LocalStackSetup {
    fn drop(&mut self) {
        let dynamodb_client = self.dynamodb_client.clone();
        let sns_client = self.sns_client.clone();
        let table_name = self.config.table_name.clone();
        let topic_arn = self.config.topic_arn.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = dynamodb_client
                    .delete_table()
                    .table_name(&table_name)
                    .send()
                    .await;
                let _ = sns_client.delete_topic().topic_arn(&topic_arn).send().await;
            });
        }
    }
}
