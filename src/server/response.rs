//! Response envelopes and error mapping

use crate::errors::{ErrorClass, ScreenError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{ success: true, data, timestamp, processingTime }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Success<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u64>,
}

impl<T: Serialize> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
            processing_time: None,
        }
    }

    pub fn timed(data: T, processing_time: u64) -> Self {
        Self {
            processing_time: Some(processing_time),
            ..Self::new(data)
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    kind: ErrorClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct Failure {
    success: bool,
    error: ErrorBody,
}

/// Error returned from a handler
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub kind: ErrorClass,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// 400 with one message per failed rule
    pub fn validation(problems: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Validation error".to_string(),
            kind: ErrorClass::ClientError,
            details: Some(serde_json::json!(problems)),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Route not found".to_string(),
            kind: ErrorClass::ClientError,
            details: Some(serde_json::json!({ "path": path })),
        }
    }
}

impl From<ScreenError> for ApiError {
    fn from(err: ScreenError) -> Self {
        let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
        if err.class() == ErrorClass::Internal {
            tracing::error!(error = %err, "request failed with internal error");
        }
        Self {
            status,
            message: err.public_message(),
            kind: err.class(),
            details: err.upstream_status().map(|s| serde_json::json!({ "upstreamStatus": s })),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Failure {
            success: false,
            error: ErrorBody {
                message: self.message,
                kind: self.kind,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for ScreenError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
