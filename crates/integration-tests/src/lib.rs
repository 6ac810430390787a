//! Shared fixtures for the cross-crate tests under `tests/`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use bg_api::middleware::cors_policy;
use bg_api::{analysis_router, AnalysisState};
use bg_core::{AnalysisResult, ReviewStore, StoreError};
use bg_services::{AnalysisService, PersistenceGateway};
use bg_store_memory::MemoryReviewStore;

/// Store that always fails the way an unreachable endpoint does.
pub struct UnreachableStore;

#[async_trait]
impl ReviewStore for UnreachableStore {
    async fn put_record(&self, _: &AnalysisResult, _: &str) -> Result<(), StoreError> {
        Err(StoreError::Transport {
            category: "connectivity fault".to_string(),
        })
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

pub fn any_origin() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn analysis_app(service: AnalysisService) -> Router {
    analysis_router(AnalysisState { service }, cors_policy(&any_origin()))
}

pub fn memory_service() -> (AnalysisService, Arc<MemoryReviewStore>) {
    let store = Arc::new(MemoryReviewStore::new());
    let service = AnalysisService::new(PersistenceGateway::new(store.clone()));
    (service, store)
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Serves `app` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });
    format!("http://{addr}")
}
