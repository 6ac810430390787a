//! # Persistence Gateway
//!
//! Best-effort durable write of analysis records. The gateway is fail-open:
//! every `StoreError` is downgraded to a [`DegradedNotice`] and logged, never
//! returned to the caller.

use std::sync::Arc;
use std::time::Duration;

use bg_core::{AnalysisResult, ReviewStore, StoreError, DEFAULT_DESTINATION};
use tracing::{error, info, instrument, warn, Instrument};

pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Non-durable record of a write that did not land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedNotice {
    pub brand: String,
    pub destination: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored { destination: String },
    Degraded(DegradedNotice),
}

impl PersistOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, PersistOutcome::Stored { .. })
    }
}

pub struct PersistenceGateway {
    /// `None` when no durable backend is configured.
    store: Option<Arc<dyn ReviewStore>>,
    default_destination: String,
    timeout: Duration,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self {
            store: Some(store),
            default_destination: DEFAULT_DESTINATION.to_string(),
            timeout: DEFAULT_PERSIST_TIMEOUT,
        }
    }

    /// A gateway with no backend; every write degrades with "no credentials".
    pub fn unconfigured() -> Self {
        Self {
            store: None,
            default_destination: DEFAULT_DESTINATION.to_string(),
            timeout: DEFAULT_PERSIST_TIMEOUT,
        }
    }

    pub fn with_default_destination(mut self, destination: impl Into<String>) -> Self {
        self.default_destination = destination.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn default_destination(&self) -> &str {
        &self.default_destination
    }

    /// Attempts one write. Never fails; the outcome is informational only.
    #[instrument(name = "persist", skip_all, fields(brand = %record.brand))]
    pub async fn persist(
        &self,
        record: &AnalysisResult,
        destination_override: Option<&str>,
    ) -> PersistOutcome {
        let destination = destination_override.unwrap_or(&self.default_destination);

        match self.write(record, destination).await {
            Ok(()) => {
                info!(destination, "record saved");
                PersistOutcome::Stored {
                    destination: destination.to_string(),
                }
            }
            Err(err) => PersistOutcome::Degraded(degrade(record, destination, &err)),
        }
    }

    async fn write(&self, record: &AnalysisResult, destination: &str) -> Result<(), StoreError> {
        let Some(store) = &self.store else {
            return Err(StoreError::NoCredentials);
        };

        // The write runs on its own task so a panicking backend is contained.
        // On timeout the task is aborted.
        let store = Arc::clone(store);
        let record = record.clone();
        let destination = destination.to_string();
        let mut task = tokio::spawn(
            async move { store.put_record(&record, &destination).await }.in_current_span(),
        );

        match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) if join_err.is_panic() => Err(StoreError::Unexpected {
                type_name: "panic".to_string(),
            }),
            Ok(Err(_)) => Err(StoreError::Unexpected {
                type_name: "cancelled".to_string(),
            }),
            Err(_) => {
                task.abort();
                Err(StoreError::Transport {
                    category: "timeout".to_string(),
                })
            }
        }
    }
}

fn degrade(record: &AnalysisResult, destination: &str, err: &StoreError) -> DegradedNotice {
    match err {
        StoreError::NoCredentials => warn!("store credentials not found, using degraded save"),
        StoreError::Rejected { code, message } => {
            error!(code = %code, message = %message, "store rejected write")
        }
        StoreError::Transport { category } => error!(category = %category, "store transport fault"),
        StoreError::Unexpected { type_name } => {
            error!(type_name = %type_name, "unexpected fault while saving")
        }
    }

    let notice = DegradedNotice {
        brand: record.brand.clone(),
        destination: destination.to_string(),
        reason: err.reason().to_string(),
    };
    warn!(
        target: "brandguard::degraded_save",
        brand = %notice.brand,
        destination = %notice.destination,
        reason = %notice.reason,
        "record kept as degraded notice"
    );
    notice
}
