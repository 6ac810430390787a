//! HTTP mapping for `AppError`.

use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bg_core::AppError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    /// Body was not valid JSON or missed required fields.
    Json(JsonRejection),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Json(rejection)
    }
}

fn detail(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Json(rejection) => detail(rejection.status(), rejection.body_text()),
            ApiError::App(AppError::ValidationError(msg)) => {
                detail(StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            ApiError::App(AppError::ServiceUnavailable(msg)) => {
                detail(StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            ApiError::App(AppError::Upstream { status, body }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let content_type = if serde_json::from_slice::<serde_json::Value>(&body).is_ok() {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            ApiError::App(AppError::Internal(msg)) => {
                tracing::error!(error = %msg, "internal error");
                detail(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}
