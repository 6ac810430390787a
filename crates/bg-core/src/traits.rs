//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binaries.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::{ForwardError, StoreError};
use crate::models::{AnalysisResult, Review};

/// Durable persistence contract for analysis records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Writes one record keyed by (brand, timestamp) into `destination`.
    /// Exactly one attempt; no retries.
    async fn put_record(&self, record: &AnalysisResult, destination: &str)
        -> Result<(), StoreError>;

    /// Backend label used in logs (e.g. "dynamodb", "memory").
    fn backend(&self) -> &'static str;
}

/// Forwarding contract used by the intake service.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AnalysisUpstream: Send + Sync {
    /// Sends the review to the analysis service once and returns the raw
    /// success body.
    async fn forward(&self, review: &Review) -> Result<Bytes, ForwardError>;
}

/// Time source for analysis timestamps.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
