//! # Intake Handlers
//!
//! `POST /submit` validates a review and forwards it once to the analysis
//! service. No retries, no queuing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bg_core::{AnalysisUpstream, AppError, ForwardError, HealthStatus, Review, ReviewPayload};
use bytes::Bytes;
use tracing::{error, info};

use crate::error::ApiError;
use crate::handlers::validated;

pub const INGESTION_SERVICE_NAME: &str = "ingestion_service";

#[derive(Clone)]
pub struct IntakeState {
    pub upstream: Arc<dyn AnalysisUpstream>,
}

pub async fn submit(
    State(state): State<IntakeState>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let review = validated(payload)?;
    info!(brand = review.brand(), "review received");

    let body = match state.upstream.forward(&review).await {
        Ok(body) => body,
        Err(err) => {
            match &err {
                ForwardError::Timeout => error!("timeout while connecting to analysis service"),
                ForwardError::Connect(cause) => {
                    error!(cause = %cause, "connection error to analysis service")
                }
                ForwardError::Upstream { status, .. } => {
                    error!(status, "analysis service returned error")
                }
            }
            return Err(AppError::from(err).into());
        }
    };

    info!(brand = review.brand(), "analysis completed");
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy(INGESTION_SERVICE_NAME))
}

/// Forwards reviews to the analysis endpoint over HTTP.
pub struct HttpAnalysisUpstream {
    client: reqwest::Client,
    url: String,
}

impl HttpAnalysisUpstream {
    /// `timeout` bounds the whole exchange, connect through body.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AnalysisUpstream for HttpAnalysisUpstream {
    async fn forward(&self, review: &Review) -> Result<Bytes, ForwardError> {
        let response = self
            .client
            .post(&self.url)
            .json(review)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(ForwardError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn transport_error(err: reqwest::Error) -> ForwardError {
    if err.is_timeout() {
        ForwardError::Timeout
    } else {
        ForwardError::Connect(err.to_string())
    }
}
