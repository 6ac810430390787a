//! # bg-api
//!
//! The HTTP routing layer for both BrandGuard services.

pub mod error;
pub mod handlers;
pub mod intake;
pub mod middleware;
pub mod server;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub use error::ApiError;
pub use handlers::{AnalysisState, SENTIMENT_SERVICE_NAME};
pub use intake::{HttpAnalysisUpstream, IntakeState, INGESTION_SERVICE_NAME};

/// Routes of the sentiment service: `POST /analyze`, `GET /health`.
pub fn analysis_router(state: AnalysisState, cors: CorsLayer) -> Router {
    let router = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health))
        .with_state(state);
    middleware::with_standard_layers(router, cors)
}

/// Routes of the ingestion service: `POST /submit`, `GET /health`.
pub fn intake_router(state: IntakeState, cors: CorsLayer) -> Router {
    let router = Router::new()
        .route("/submit", post(intake::submit))
        .route("/health", get(intake::health))
        .with_state(state);
    middleware::with_standard_layers(router, cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use bg_core::{ForwardError, MockAnalysisUpstream};
    use bg_services::{AnalysisService, PersistenceGateway};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn analysis_app() -> Router {
        let state = AnalysisState {
            service: AnalysisService::new(PersistenceGateway::unconfigured()),
        };
        analysis_router(state, middleware::cors_policy(&["*".to_string()]))
    }

    fn intake_app(upstream: MockAnalysisUpstream) -> Router {
        let state = IntakeState {
            upstream: Arc::new(upstream),
        };
        intake_router(state, middleware::cors_policy(&["*".to_string()]))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_returns_result() {
        let response = analysis_app()
            .oneshot(post_json(
                "/analyze",
                r#"{"brand":"Acme","text":"This product is amazing!"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let body = json_body(response).await;
        assert_eq!(body["brand"], "Acme");
        assert_eq!(body["sentiment"], "POSITIVE");
        assert!(body["score"].as_f64().unwrap() > 0.1);
        assert!(body["timestamp"].as_str().unwrap().ends_with("+00:00"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_brand() {
        let response = analysis_app()
            .oneshot(post_json("/analyze", r#"{"brand":"   ","text":"fine"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().unwrap().contains("brand"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_missing_field() {
        let response = analysis_app()
            .oneshot(post_json("/analyze", r#"{"brand":"Acme"}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let response = analysis_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"status": "healthy", "service": "sentiment_service"})
        );

        let response = intake_app(MockAnalysisUpstream::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"status": "healthy", "service": "ingestion_service"})
        );
    }

    #[tokio::test]
    async fn test_submit_relays_success_body_unchanged() {
        let upstream_body = r#"{"brand":"Acme","text":"ok","sentiment":"NEUTRAL","score":0.1,"timestamp":"t"}"#;
        let mut upstream = MockAnalysisUpstream::new();
        upstream
            .expect_forward()
            .withf(|review| review.brand() == "Acme" && review.text() == "ok")
            .times(1)
            .returning(move |_| Ok(bytes::Bytes::from_static(upstream_body.as_bytes())));

        let response = intake_app(upstream)
            .oneshot(post_json("/submit", r#"{"brand":" Acme ","text":"ok "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, upstream_body.as_bytes());
    }

    #[tokio::test]
    async fn test_submit_validation_never_forwards() {
        let mut upstream = MockAnalysisUpstream::new();
        upstream.expect_forward().never();

        let response = intake_app(upstream)
            .oneshot(post_json("/submit", r#"{"brand":"","text":"fine"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_submit_maps_forward_failures() {
        let cases = [
            (ForwardError::Timeout, StatusCode::SERVICE_UNAVAILABLE, "try again later"),
            (
                ForwardError::Connect("connection refused".into()),
                StatusCode::SERVICE_UNAVAILABLE,
                "check service status",
            ),
        ];
        for (err, status, hint) in cases {
            let mut upstream = MockAnalysisUpstream::new();
            upstream.expect_forward().returning(move |_| Err(err.clone()));

            let response = intake_app(upstream)
                .oneshot(post_json("/submit", r#"{"brand":"Acme","text":"fine"}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), status);
            let body = json_body(response).await;
            assert!(body["detail"].as_str().unwrap().contains(hint));
        }
    }

    #[tokio::test]
    async fn test_submit_relays_upstream_error_verbatim() {
        let mut upstream = MockAnalysisUpstream::new();
        upstream.expect_forward().returning(|_| {
            Err(ForwardError::Upstream {
                status: 429,
                body: r#"{"detail":"slow down"}"#.into(),
            })
        });

        let response = intake_app(upstream)
            .oneshot(post_json("/submit", r#"{"brand":"Acme","text":"fine"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json_body(response).await, serde_json::json!({"detail": "slow down"}));
    }
}
