//! # Sentiment Service Binary
//!
//! Assembles the analysis pipeline from config and compile-time features.

use std::sync::Arc;

use anyhow::Context;
use bg_api::middleware::cors_policy;
use bg_api::server::{init_tracing, shutdown_signal};
use bg_api::{analysis_router, AnalysisState};
use bg_config::{LogFormat, SentimentSettings, Settings, StoreBackend};
use bg_core::ReviewStore;
use bg_services::{AnalysisService, PersistenceGateway};
use tokio::net::TcpListener;

// Feature-gated imports: the store plugins are compiled to order
#[cfg(feature = "store-dynamodb")]
use bg_store_dynamodb::{DynamoOptions, DynamoReviewStore, StaticCredentials};

#[cfg(feature = "store-memory")]
use bg_store_memory::MemoryReviewStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = bg_config::load_dotenv();
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.log.filter, settings.log.format == LogFormat::Json);
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    // 1. Durable store (or none: every record degrades)
    let gateway = match build_store(&settings.sentiment).await? {
        Some(store) => {
            tracing::info!(backend = store.backend(), "durable store configured");
            PersistenceGateway::new(store)
        }
        None => {
            tracing::warn!("no durable store configured, records will only be logged");
            PersistenceGateway::unconfigured()
        }
    }
    .with_default_destination(settings.sentiment.table_name.as_str())
    .with_timeout(settings.sentiment.persist_timeout());

    // 2. Pipeline and routes
    let state = AnalysisState {
        service: AnalysisService::new(gateway),
    };
    let app = analysis_router(state, cors_policy(&settings.http.cors_allowed_origins));

    let listener = TcpListener::bind(&settings.sentiment.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.sentiment.bind))?;
    tracing::info!(
        addr = %settings.sentiment.bind,
        table = %settings.sentiment.table_name,
        "sentiment service starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_store(
    settings: &SentimentSettings,
) -> anyhow::Result<Option<Arc<dyn ReviewStore>>> {
    match settings.store {
        StoreBackend::None => Ok(None),

        #[cfg(feature = "store-dynamodb")]
        StoreBackend::Dynamodb => {
            use secrecy::ExposeSecret;

            let aws = &settings.aws;
            let static_credentials = match (&aws.access_key_id, &aws.secret_access_key) {
                (Some(id), Some(secret)) => Some(StaticCredentials {
                    access_key_id: id.clone(),
                    secret_access_key: secret.expose_secret().to_string(),
                }),
                _ => None,
            };
            let store = DynamoReviewStore::connect(DynamoOptions {
                region: aws.region.clone(),
                endpoint_url: aws.endpoint_url.clone(),
                static_credentials,
                operation_timeout: Some(settings.persist_timeout()),
            })
            .await;
            Ok(Some(Arc::new(store)))
        }

        #[cfg(feature = "store-memory")]
        StoreBackend::Memory => Ok(Some(Arc::new(MemoryReviewStore::new()))),

        #[allow(unreachable_patterns)]
        other => anyhow::bail!("store backend {other:?} is not compiled into this binary"),
    }
}
