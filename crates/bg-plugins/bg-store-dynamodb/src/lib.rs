//! # bg-store-dynamodb
//!
//! DynamoDB implementation of `ReviewStore`.
//! Items are keyed by `brand` (partition) and `timestamp` (sort).

use std::error::Error;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use bg_core::{AnalysisResult, ReviewStore, StoreError};

/// Connection options. Anything left `None` falls back to the standard AWS
/// environment chain (`AWS_REGION`, `AWS_ACCESS_KEY_ID`, profiles, IMDS).
#[derive(Debug, Clone, Default)]
pub struct DynamoOptions {
    pub region: Option<String>,
    /// e.g. `http://localhost:8000` for DynamoDB Local
    pub endpoint_url: Option<String>,
    pub static_credentials: Option<StaticCredentials>,
    /// Upper bound on a whole `PutItem` call, connect through response.
    pub operation_timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

pub struct DynamoReviewStore {
    client: Client,
    /// False only when the loaded config has no credential provider at all.
    /// A provider that fails is retried on every write.
    has_provider: bool,
}

impl DynamoReviewStore {
    /// Loads the shared AWS config and checks the credential chain once for
    /// the startup log. Retries are disabled: each record gets exactly one
    /// attempt.
    pub async fn connect(options: DynamoOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::disabled());
        if let Some(region) = options.region {
            loader = loader.region(Region::new(region));
        }
        if let Some(endpoint) = options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(creds) = options.static_credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id,
                creds.secret_access_key,
                None,
                None,
                "brandguard-config",
            ));
        }
        if let Some(timeout) = options.operation_timeout {
            loader = loader.timeout_config(
                TimeoutConfig::builder().operation_timeout(timeout).build(),
            );
        }
        let sdk_config = loader.load().await;

        let has_provider = match sdk_config.credentials_provider() {
            Some(provider) => {
                if let Err(err) = provider.provide_credentials().await {
                    tracing::warn!(error = %err, "AWS credentials not resolvable yet");
                }
                true
            }
            None => {
                tracing::warn!("no AWS credential provider configured");
                false
            }
        };

        Self::from_client(Client::new(&sdk_config), has_provider)
    }

    pub fn from_client(client: Client, has_provider: bool) -> Self {
        Self {
            client,
            has_provider,
        }
    }
}

#[async_trait]
impl ReviewStore for DynamoReviewStore {
    async fn put_record(
        &self,
        record: &AnalysisResult,
        destination: &str,
    ) -> Result<(), StoreError> {
        if !self.has_provider {
            return Err(StoreError::NoCredentials);
        }

        self.client
            .put_item()
            .table_name(destination)
            .item("brand", AttributeValue::S(record.brand.clone()))
            .item("timestamp", AttributeValue::S(record.timestamp.clone()))
            .item("text", AttributeValue::S(record.text.clone()))
            .item("sentiment", AttributeValue::S(record.sentiment.as_str().to_string()))
            .item("score", AttributeValue::N(record.score.to_string()))
            .send()
            .await
            .map(|_| ())
            .map_err(classify_sdk_error)
    }

    fn backend(&self) -> &'static str {
        "dynamodb"
    }
}

/// Sorts an SDK failure into the store taxonomy.
fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: std::fmt::Debug + 'static,
{
    // Credentials are resolved per request; a failing chain surfaces as a
    // construction or dispatch failure wrapping a `CredentialsError`.
    if caused_by_credentials(&err) {
        return StoreError::NoCredentials;
    }

    match &err {
        SdkError::ServiceError(service) => {
            let inner = service.err();
            StoreError::Rejected {
                code: inner.code().unwrap_or("Unknown").to_string(),
                message: inner.message().unwrap_or_default().to_string(),
            }
        }
        SdkError::TimeoutError(_) => transport("timeout"),
        SdkError::DispatchFailure(failure) => {
            if failure.is_timeout() {
                transport("timeout")
            } else if failure.is_io() {
                transport("io")
            } else if failure.is_user() {
                transport("user")
            } else {
                transport("dispatch")
            }
        }
        SdkError::ResponseError(_) => transport("response"),
        SdkError::ConstructionFailure(_) => StoreError::Unexpected {
            type_name: "ConstructionFailure".to_string(),
        },
        _ => StoreError::Unexpected {
            type_name: "SdkError".to_string(),
        },
    }
}

fn caused_by_credentials(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(cause) = current {
        if cause.is::<CredentialsError>() {
            return true;
        }
        current = cause.source();
    }
    false
}

fn transport(category: &str) -> StoreError {
    StoreError::Transport {
        category: category.to_string(),
    }
}
