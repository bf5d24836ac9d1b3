//! HTTP surface tests driven through `tower::ServiceExt::oneshot`

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::*;
use mdd_screener::diagnosis::ImpairmentSignal;
use mdd_screener::server::{router, AppState};
use mdd_screener::AssessmentPipeline;
use serde_json::{json, Value};
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:5173";

fn app(extractor: std::sync::Arc<FakeExtractor>, assessor: std::sync::Arc<FakeAssessor>) -> Router {
    router(AppState::new(AssessmentPipeline::new(extractor, assessor)), ORIGIN).unwrap()
}

fn healthy_app() -> Router {
    app(
        FakeExtractor::returning(extraction(&ALL_NINE, 21, ImpairmentSignal::none())),
        FakeAssessor::ok(),
    )
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn analyze(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/assessment/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_analyze_returns_report() {
    let (status, body) = send(
        healthy_app(),
        analyze(json!({"text": "I have felt empty and hopeless for three weeks now."})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["processingTime"].is_number());
    let data = &body["data"];
    assert_eq!(data["diagnosis"]["meetsThreshold"], true);
    assert_eq!(data["diagnosis"]["confidence"], "high");
    assert_eq!(data["severity"]["level"], "severe");
    assert_eq!(data["recommendations"][0]["type"], "crisis_intervention");
    assert_eq!(data["symptoms"].as_array().map(|s| s.len()), Some(9));
    assert_eq!(data["symptoms"][0]["dsm5Code"], "A1");
    assert!(data["aiAssessment"]["assessment"]["clinical_narrative"].is_string());
    assert!(data["disclaimer"].as_str().unwrap().contains("NOT a substitute"));
}

#[tokio::test]
async fn test_analyze_validation_errors() {
    let extractor = FakeExtractor::returning(extraction(&[], 0, ImpairmentSignal::none()));
    let (status, body) = send(
        app(extractor.clone(), FakeAssessor::ok()),
        analyze(json!({"text": "short", "sessionId": "nope"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Validation error");
    assert_eq!(body["error"]["kind"], "client_error");
    assert_eq!(body["error"]["details"].as_array().map(|d| d.len()), Some(2));
    assert_eq!(extractor.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/assessment/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(healthy_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "client_error");
}

#[tokio::test]
async fn test_analyze_extractor_down_is_503() {
    let assessor = FakeAssessor::ok();
    let (status, body) = send(
        app(FakeExtractor::with(Behavior::Fail(None), false), assessor.clone()),
        analyze(json!({"text": "I have felt empty and hopeless for weeks."})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["kind"], "upstream_unavailable");
    assert_eq!(assessor.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_assessor_error_is_bad_gateway() {
    let (status, body) = send(
        app(
            FakeExtractor::returning(extraction(&["fatigue"], 0, ImpairmentSignal::none())),
            FakeAssessor::with(Behavior::Fail(Some(422)), true),
        ),
        analyze(json!({"text": "I have felt empty and hopeless for weeks."})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["kind"], "upstream_unavailable");
    assert_eq!(body["error"]["details"]["upstreamStatus"], 422);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_health_healthy_is_200() {
    let (status, body) = send(healthy_app(), get("/api/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["dependencies"]["symptomExtractor"]["status"], "healthy");
    assert_eq!(body["data"]["dependencies"]["narrativeAssessor"]["details"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_is_503() {
    let (status, body) = send(
        app(FakeExtractor::with(Behavior::Fail(None), false), FakeAssessor::ok()),
        get("/api/v1/health"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["data"]["status"], "degraded");
    assert_eq!(body["data"]["dependencies"]["symptomExtractor"]["status"], "unhealthy");
    assert!(body["data"]["dependencies"]["symptomExtractor"]["error"].is_string());
}

#[tokio::test]
async fn test_info_and_root() {
    let (status, body) = send(healthy_app(), get("/api/v1/assessment")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], "Depression Diagnosis Assessment API");
    assert_eq!(body["data"]["capabilities"]["features"].as_array().map(|f| f.len()), Some(5));

    let (status, body) = send(healthy_app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, body) = send(healthy_app(), get("/api/v2/nothing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Route not found");
    assert_eq!(body["error"]["details"]["path"], "/api/v2/nothing");
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/assessment/analyze")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = healthy_app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );
}

#[tokio::test]
async fn test_cors_allows_only_routed_methods() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/assessment/analyze")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = healthy_app().oneshot(request).await.unwrap();
    let headers = response.headers();

    let methods = headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap().to_str().unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("POST"));
    assert!(!methods.contains("PUT"));
    assert!(!methods.contains("DELETE"));

    let allowed = headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap().to_str().unwrap();
    assert!(allowed.contains("content-type"));
    assert!(!allowed.contains("authorization"));
}
