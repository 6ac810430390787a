//! # bg-store-memory
//!
//! In-process implementation of `ReviewStore`.
//! Nothing survives a restart; meant for local development and tests.

use async_trait::async_trait;
use bg_core::{AnalysisResult, ReviewStore, StoreError};
use dashmap::{DashMap, DashSet};

/// (destination, brand, timestamp)
type RecordKey = (String, String, String);

#[derive(Default)]
pub struct MemoryReviewStore {
    records: DashMap<RecordKey, AnalysisResult>,
    /// When set, writes to any other destination are rejected like a
    /// missing DynamoDB table.
    known_tables: Option<DashSet<String>>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept writes into the listed destinations.
    pub fn with_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: DashMap::new(),
            known_tables: Some(tables.into_iter().map(Into::into).collect()),
        }
    }

    /// Records held for `destination`, ordered by (brand, timestamp).
    pub fn records(&self, destination: &str) -> Vec<AnalysisResult> {
        let mut found: Vec<AnalysisResult> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == destination)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| (&a.brand, &a.timestamp).cmp(&(&b.brand, &b.timestamp)));
        found
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn put_record(
        &self,
        record: &AnalysisResult,
        destination: &str,
    ) -> Result<(), StoreError> {
        if let Some(tables) = &self.known_tables {
            if !tables.contains(destination) {
                return Err(StoreError::Rejected {
                    code: "ResourceNotFoundException".to_string(),
                    message: format!(
                        "Requested resource not found: Table: {destination} not found"
                    ),
                });
            }
        }

        let key = (
            destination.to_string(),
            record.brand.clone(),
            record.timestamp.clone(),
        );
        // Same natural key overwrites, as a put would.
        self.records.insert(key, record.clone());
        tracing::debug!(destination, brand = %record.brand, "record held in memory");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
