//! # AppError
//!
//! Centralized error handling for the BrandGuard services.
//! Maps pipeline failures to actionable error types.

use bytes::Bytes;
use thiserror::Error;

/// The primary error type surfaced at the HTTP boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Validation failure (e.g., empty brand, whitespace-only text)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A downstream service could not be reached in time
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A downstream service answered with a non-success status.
    /// The body is relayed verbatim.
    #[error("upstream error ({status})")]
    Upstream { status: u16, body: Bytes },

    /// Infrastructure failure that is our own fault
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for BrandGuard logic.
pub type Result<T> = std::result::Result<T, AppError>;

/// Why a durable write did not land.
///
/// Returned by `ReviewStore::put_record`; the persistence gateway matches on
/// the kind to pick its fallback reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store not configured, or no credentials could be resolved
    #[error("no credentials")]
    NoCredentials,

    /// The store answered and refused (missing table, access denied, throttled)
    #[error("store rejected write ({code}): {message}")]
    Rejected { code: String, message: String },

    /// Network, DNS, TLS or timeout trouble on the way to the store
    #[error("transport fault: {category}")]
    Transport { category: String },

    /// Anything we could not classify
    #[error("unexpected fault: {type_name}")]
    Unexpected { type_name: String },
}

impl StoreError {
    /// Short reason recorded in the degraded notice.
    pub fn reason(&self) -> &str {
        match self {
            StoreError::NoCredentials => "no credentials",
            StoreError::Rejected { code, .. } => code,
            StoreError::Transport { category } => category,
            StoreError::Unexpected { type_name } => type_name,
        }
    }
}

pub const UPSTREAM_TIMEOUT_DETAIL: &str =
    "Sentiment Service is not responding. Please try again later.";
pub const UPSTREAM_CONNECT_DETAIL: &str =
    "Unable to connect to Sentiment Service. Please check service status.";

/// Failure of the single forward attempt from intake to analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForwardError {
    #[error("timed out waiting for the analysis service")]
    Timeout,

    #[error("could not reach the analysis service: {0}")]
    Connect(String),

    #[error("analysis service returned {status}")]
    Upstream { status: u16, body: Bytes },
}

impl From<ForwardError> for AppError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::Timeout => AppError::ServiceUnavailable(UPSTREAM_TIMEOUT_DETAIL.into()),
            ForwardError::Connect(_) => {
                AppError::ServiceUnavailable(UPSTREAM_CONNECT_DETAIL.into())
            }
            ForwardError::Upstream { status, body } => AppError::Upstream { status, body },
        }
    }
}
