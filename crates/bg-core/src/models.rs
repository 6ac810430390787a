//! # Domain Models
//!
//! The review that comes in and the analysis that goes out (and into the store).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppError, Result};

/// Raw submission body as it arrives on the wire, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub brand: String,
    pub text: String,
}

/// A validated customer review. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    brand: String,
    text: String,
}

impl Review {
    pub fn new(brand: impl AsRef<str>, text: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            brand: non_empty("brand", brand.as_ref())?,
            text: non_empty("text", text.as_ref())?,
        })
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TryFrom<ReviewPayload> for Review {
    type Error = AppError;

    fn try_from(payload: ReviewPayload) -> Result<Self> {
        Self::new(payload.brand, payload.text)
    }
}

fn non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{field}: Field cannot be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Sentiment category derived from the polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Critical,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of analyzing one review.
///
/// Returned to the caller and, as an equal copy, handed to the store.
/// Stored under the natural key (`brand`, `timestamp`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub brand: String,
    pub text: String,
    pub sentiment: Sentiment,
    /// Polarity in [-1.0, 1.0]
    pub score: f64,
    /// ISO-8601 UTC instant, fixed at analysis time
    pub timestamp: String,
}

/// Body of the `GET /health` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    pub fn healthy(service: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.to_string(),
        }
    }
}
