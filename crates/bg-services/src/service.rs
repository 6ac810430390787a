//! # Analysis Service
//!
//! Classify, timestamp, hand off to persistence, return.

use std::sync::Arc;

use bg_core::{AnalysisResult, Clock, Review, SystemClock};
use chrono::SecondsFormat;
use tokio::task::JoinHandle;
use tracing::{info, instrument, Instrument};

use crate::classifier::{classify, Classification};
use crate::gateway::{PersistOutcome, PersistenceGateway};

#[derive(Clone)]
pub struct AnalysisService {
    gateway: Arc<PersistenceGateway>,
    clock: Arc<dyn Clock>,
}

impl AnalysisService {
    pub fn new(gateway: PersistenceGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    /// Analyzes a review and returns immediately; the durable write happens
    /// on a detached task and can neither fail nor delay this call.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn analyze(&self, review: &Review) -> AnalysisResult {
        let (result, _persisted) = self.analyze_tracked(review, None);
        result
    }

    /// Same as [`analyze`](Self::analyze) but also returns the persistence
    /// task so the outcome can be observed.
    #[instrument(name = "analyze", skip_all, fields(brand = %review.brand()))]
    pub fn analyze_tracked(
        &self,
        review: &Review,
        destination_override: Option<&str>,
    ) -> (AnalysisResult, JoinHandle<PersistOutcome>) {
        let Classification { sentiment, score } = classify(review.text());
        let timestamp = self
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Micros, false);

        let result = AnalysisResult {
            brand: review.brand().to_string(),
            text: review.text().to_string(),
            sentiment,
            score,
            timestamp,
        };

        let gateway = Arc::clone(&self.gateway);
        let record = result.clone();
        let destination = destination_override.map(str::to_string);
        let persisted = tokio::spawn(
            async move { gateway.persist(&record, destination.as_deref()).await }
                .in_current_span(),
        );

        info!(sentiment = %result.sentiment, score = result.score, "analysis completed");
        (result, persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bg_core::{MockClock, MockReviewStore, Sentiment, StoreError};
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        Arc::new(clock)
    }

    #[tokio::test]
    async fn test_result_carries_trimmed_input_and_timestamp() {
        let service = AnalysisService::new(PersistenceGateway::unconfigured())
            .with_clock(fixed_clock());
        let review = Review::new(" Acme ", " This product is amazing! ").unwrap();

        let result = service.analyze(&review);
        assert_eq!(result.brand, "Acme");
        assert_eq!(result.text, "This product is amazing!");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.timestamp, "2024-05-01T10:00:00.000000+00:00");
    }

    #[tokio::test]
    async fn test_persisted_copy_equals_returned_result() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut store = MockReviewStore::new();
        store.expect_put_record().times(1).returning(move |rec, _| {
            tx.send(rec.clone()).unwrap();
            Ok(())
        });
        let gateway = PersistenceGateway::new(Arc::new(store));
        let service = AnalysisService::new(gateway).with_clock(fixed_clock());
        let review = Review::new("Acme", "Terrible service, very disappointed").unwrap();

        let (result, persisted) = service.analyze_tracked(&review, None);
        assert!(persisted.await.unwrap().is_stored());
        assert_eq!(rx.recv().await.unwrap(), result);
    }

    #[tokio::test]
    async fn test_store_failure_does_not_change_result() {
        let mut store = MockReviewStore::new();
        store.expect_put_record().returning(|_, _| {
            Err(StoreError::Transport {
                category: "io".into(),
            })
        });
        let failing = AnalysisService::new(PersistenceGateway::new(Arc::new(store)))
            .with_clock(fixed_clock());
        let healthy =
            AnalysisService::new(PersistenceGateway::unconfigured()).with_clock(fixed_clock());
        let review = Review::new("Acme", "It was okay, nothing special").unwrap();

        let (result, persisted) = failing.analyze_tracked(&review, None);
        assert_eq!(result, healthy.analyze(&review));
        assert_eq!(result.sentiment, Sentiment::Neutral);
        match persisted.await.unwrap() {
            PersistOutcome::Degraded(notice) => assert_eq!(notice.reason, "io"),
            other => panic!("expected degraded outcome, got {other:?}"),
        }
    }

    struct StalledStore;

    #[async_trait::async_trait]
    impl bg_core::ReviewStore for StalledStore {
        async fn put_record(&self, _: &AnalysisResult, _: &str) -> Result<(), StoreError> {
            std::future::pending::<()>().await;
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_analyze_returns_while_store_hangs() {
        let service = AnalysisService::new(
            PersistenceGateway::new(Arc::new(StalledStore)).with_timeout(Duration::from_secs(30)),
        );
        let review = Review::new("Acme", "good").unwrap();

        let result = tokio::time::timeout(Duration::from_millis(500), async {
            service.analyze(&review)
        })
        .await
        .expect("analyze must not wait on the store");
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_destination_override_reaches_store() {
        let mut store = MockReviewStore::new();
        store
            .expect_put_record()
            .withf(|_, dest| dest == "reviews-eu")
            .times(1)
            .returning(|_, _| Ok(()));
        let service = AnalysisService::new(PersistenceGateway::new(Arc::new(store)));
        let review = Review::new("Acme", "good").unwrap();

        let (_, persisted) = service.analyze_tracked(&review, Some("reviews-eu"));
        assert_eq!(
            persisted.await.unwrap(),
            PersistOutcome::Stored {
                destination: "reviews-eu".into()
            }
        );
    }
}
