//! # Analysis Handlers
//!
//! `POST /analyze` and `GET /health` for the sentiment service.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use bg_core::{AnalysisResult, HealthStatus, Review, ReviewPayload};
use bg_services::AnalysisService;
use tracing::info;

use crate::error::ApiError;

pub const SENTIMENT_SERVICE_NAME: &str = "sentiment_service";

/// State shared across all analysis requests.
#[derive(Clone)]
pub struct AnalysisState {
    pub service: AnalysisService,
}

/// Turns the raw body into a validated `Review`, or a client error.
pub(crate) fn validated(
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> Result<Review, ApiError> {
    let Json(payload) = payload?;
    Ok(Review::try_from(payload)?)
}

pub async fn analyze(
    State(state): State<AnalysisState>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let review = validated(payload)?;
    info!(brand = review.brand(), "analyzing review");

    Ok(Json(state.service.analyze(&review)))
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy(SENTIMENT_SERVICE_NAME))
}
