//! # Ingestion Service Binary
//!
//! Public intake endpoint that validates reviews and forwards them to the
//! sentiment service.

use std::sync::Arc;

use anyhow::Context;
use bg_api::middleware::cors_policy;
use bg_api::server::{init_tracing, shutdown_signal};
use bg_api::{intake_router, HttpAnalysisUpstream, IntakeState};
use bg_config::{LogFormat, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = bg_config::load_dotenv();
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.log.filter, settings.log.format == LogFormat::Json);
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let ingestion = &settings.ingestion;
    let upstream =
        HttpAnalysisUpstream::new(ingestion.analysis_url.as_str(), ingestion.forward_timeout())
            .context("failed to build HTTP client")?;
    let state = IntakeState {
        upstream: Arc::new(upstream),
    };
    let app = intake_router(state, cors_policy(&settings.http.cors_allowed_origins));

    let listener = TcpListener::bind(&ingestion.bind)
        .await
        .with_context(|| format!("failed to bind {}", ingestion.bind))?;
    tracing::info!(
        addr = %ingestion.bind,
        upstream = %ingestion.analysis_url,
        "ingestion service starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
