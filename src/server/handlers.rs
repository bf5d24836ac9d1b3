//! Route handlers

use super::request::AnalyzeRequest;
use super::response::{ApiError, Success};
use super::AppState;
use crate::pipeline::HealthReport;
use crate::report::AssessmentReport;
use crate::services::ProbeResult;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use std::time::Instant;

pub const SERVICE_NAME: &str = "Depression Diagnosis Assessment API";
pub const API_VERSION: &str = "1.0.0";

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": API_VERSION,
        "status": "running",
        "endpoints": {
            "health": "/api/v1/health",
            "assessment": "/api/v1/assessment",
            "analyze": "POST /api/v1/assessment/analyze",
        },
    }))
}

/// `GET /api/v1/assessment`
pub async fn info(State(state): State<AppState>) -> Json<Success<Value>> {
    let criteria = state.pipeline.criteria();
    Json(Success::new(json!({
        "service": SERVICE_NAME,
        "version": API_VERSION,
        "capabilities": {
            "disorder": criteria.name,
            "criteria": "DSM-5",
            "requiredSymptoms": criteria.required_symptom_count,
            "requiredDurationDays": criteria.required_duration_days,
            "exclusionCriteria": criteria.exclusion_criteria,
            "features": [
                "Natural language symptom extraction",
                "Rule-based diagnostic matching",
                "Severity assessment",
                "Functional impairment detection",
                "Crisis detection",
            ],
        },
        "endpoints": {
            "analyze": "POST /api/v1/assessment/analyze",
            "health": "GET /api/v1/health",
        },
    })))
}

/// `POST /api/v1/assessment/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Success<AssessmentReport>>, ApiError> {
    let started = Instant::now();

    let Json(body) = payload.map_err(|rejection| ApiError::validation(vec![rejection.body_text()]))?;
    let request = body.validate().map_err(ApiError::validation)?;

    tracing::info!(
        session_id = request.session_id.as_deref().unwrap_or("-"),
        text_chars = request.text.chars().count(),
        "assessment request"
    );

    let report = state.pipeline.assess(&request.text, request.session_id).await?;
    let elapsed = started.elapsed().as_millis() as u64;

    tracing::info!(
        request_id = %report.request_id,
        meets_threshold = report.diagnosis.meets_threshold,
        severity = %report.severity.level,
        elapsed_ms = elapsed,
        "assessment completed"
    );

    Ok(Json(Success::timed(report, elapsed)))
}

fn dependency(probe: &ProbeResult) -> Value {
    json!({
        "status": probe.status,
        "error": probe.error,
        "details": probe.details,
    })
}

fn health_body(report: &HealthReport, uptime_secs: u64) -> Value {
    json!({
        "status": report.status,
        "service": "mdd-screener",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "uptime": uptime_secs,
        "responseTime": report.response_time_ms,
        "dependencies": {
            "symptomExtractor": dependency(&report.extractor),
            "narrativeAssessor": dependency(&report.assessor),
        },
    })
}

/// `GET /api/v1/health`; 200 only when every collaborator is healthy
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.pipeline.health().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = health_body(&report, state.started.elapsed().as_secs());
    (status, Json(Success::new(body)))
}

/// Unknown route
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
