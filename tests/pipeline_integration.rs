//! Integration tests for the assessment pipeline
//!
//! Runs the full extract -> evaluate -> assess flow against fake collaborators.

mod common;

use common::*;
use mdd_screener::criteria::SeverityLevel;
use mdd_screener::diagnosis::{ConfidenceTier, ImpairmentSignal, Priority};
use mdd_screener::pipeline::{OverallStatus, PipelineTimeouts};
use mdd_screener::{AssessmentPipeline, ErrorClass, ScreenError};
use std::time::Duration;

const TEXT: &str = "I have felt empty and hopeless for about three weeks.";

#[tokio::test]
async fn test_full_house_report() {
    let extractor = FakeExtractor::returning(extraction(&ALL_NINE, 21, ImpairmentSignal::none()));
    let assessor = FakeAssessor::ok();
    let pipeline = AssessmentPipeline::new(extractor.clone(), assessor.clone());

    let report = pipeline.assess(TEXT, None).await.unwrap();

    assert!(report.diagnosis.meets_threshold);
    assert_eq!(report.diagnosis.confidence, ConfidenceTier::High);
    assert_eq!(report.severity.level, SeverityLevel::Severe);
    assert!(report.diagnosis.crisis_detected);
    assert_eq!(report.recommendations[0].priority, Priority::Critical);
    assert_eq!(report.symptoms.len(), 9);
    assert_eq!(report.session_id, report.request_id);
    assert_eq!(report.metadata.duration_days, 21);
    assert!(report.metadata.duration_specified);
    assert_eq!(report.metadata.extraction_ms, Some(12.5));
    assert!(report.disclaimer.starts_with("IMPORTANT DISCLAIMER"));
    assert_eq!(extractor.call_count(), 1);
    assert_eq!(assessor.call_count(), 1);
}

#[tokio::test]
async fn test_unspecified_duration_scenario() {
    let ids = ["depressed_mood", "fatigue", "worthlessness", "concentration", "sleep_disturbance", "weight_change"];
    let pipeline = AssessmentPipeline::new(
        FakeExtractor::returning(extraction(&ids, 0, ImpairmentSignal::none())),
        FakeAssessor::ok(),
    );

    let report = pipeline.assess(TEXT, None).await.unwrap();

    assert!(report.diagnosis.meets_threshold);
    assert_eq!(report.diagnosis.confidence, ConfidenceTier::Moderate);
    assert!(!report.metadata.duration_specified);
}

#[tokio::test]
async fn test_crisis_with_two_symptoms() {
    let pipeline = AssessmentPipeline::new(
        FakeExtractor::returning(extraction(&["fatigue", "suicidal_ideation"], 0, ImpairmentSignal::none())),
        FakeAssessor::ok(),
    );

    let report = pipeline.assess(TEXT, None).await.unwrap();

    assert!(!report.diagnosis.meets_threshold);
    assert!(report.diagnosis.crisis_detected);
    let priorities: Vec<Priority> = report.recommendations.iter().map(|r| r.priority).collect();
    assert_eq!(priorities, vec![Priority::Critical, Priority::General]);
}

#[tokio::test]
async fn test_severe_impairment_escalates_one_band() {
    let ids = ["depressed_mood", "fatigue", "worthlessness", "concentration", "sleep_disturbance"];
    let pipeline = AssessmentPipeline::new(
        FakeExtractor::returning(extraction(&ids, 30, severe_impairment())),
        FakeAssessor::ok(),
    );

    let report = pipeline.assess(TEXT, None).await.unwrap();

    assert_eq!(report.severity.level, SeverityLevel::Moderate);
    assert_eq!(report.severity.base_level, SeverityLevel::Mild);
    assert_eq!(report.severity.score, 5);
}

#[tokio::test]
async fn test_session_id_is_kept() {
    let pipeline = AssessmentPipeline::new(
        FakeExtractor::returning(extraction(&[], 0, ImpairmentSignal::none())),
        FakeAssessor::ok(),
    );
    let session = "6f1c2c8e-3b7a-4a7e-9d8e-1f2a3b4c5d6e".to_string();

    let report = pipeline.assess(TEXT, Some(session.clone())).await.unwrap();

    assert_eq!(report.session_id, session);
    assert_ne!(report.request_id, session);
}

#[tokio::test]
async fn test_assessor_receives_mapped_context() {
    let assessor = FakeAssessor::ok();
    let pipeline = AssessmentPipeline::new(
        FakeExtractor::returning(extraction(&["fatigue"], 10, severe_impairment())),
        assessor.clone(),
    );

    pipeline.assess(TEXT, None).await.unwrap();

    let request = assessor.last_request().unwrap();
    assert_eq!(request.text, TEXT);
    assert_eq!(request.symptoms.len(), 9);
    assert!(request.symptoms[5].detected);
    assert_eq!(request.metadata.duration_days, 10);
    assert!(request.metadata.duration_specified);
    assert!(request.metadata.functional_impairment.detected);
}

#[tokio::test]
async fn test_extractor_failure_skips_assessor() {
    let extractor = FakeExtractor::with(Behavior::Fail(None), true);
    let assessor = FakeAssessor::ok();
    let pipeline = AssessmentPipeline::new(extractor.clone(), assessor.clone());

    let err = pipeline.assess(TEXT, None).await.unwrap_err();

    assert!(matches!(err, ScreenError::ExtractorUnavailable { .. }));
    assert_eq!(err.class(), ErrorClass::UpstreamUnavailable);
    assert_eq!(err.status_code(), 503);
    assert_eq!(extractor.call_count(), 1);
    assert_eq!(assessor.call_count(), 0);
}

#[tokio::test]
async fn test_extractor_timeout_skips_assessor() {
    let extractor = FakeExtractor::with(Behavior::Hang, true);
    let assessor = FakeAssessor::ok();
    let pipeline = AssessmentPipeline::new(extractor.clone(), assessor.clone()).with_timeouts(PipelineTimeouts {
        extraction: Duration::from_millis(50),
        assessment: Duration::from_secs(5),
    });

    let err = pipeline.assess(TEXT, None).await.unwrap_err();

    match err {
        ScreenError::ExtractorUnavailable { message, status } => {
            assert!(message.contains("timed out"));
            assert_eq!(status, None);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(assessor.call_count(), 0);
}

#[tokio::test]
async fn test_assessor_failure_fails_request() {
    let extractor = FakeExtractor::returning(extraction(&ALL_NINE, 21, ImpairmentSignal::none()));
    let assessor = FakeAssessor::with(Behavior::Fail(Some(500)), true);
    let pipeline = AssessmentPipeline::new(extractor.clone(), assessor.clone());

    let err = pipeline.assess(TEXT, None).await.unwrap_err();

    assert!(matches!(err, ScreenError::AssessorUnavailable { status: Some(500), .. }));
    assert_eq!(err.status_code(), 502);
    assert_eq!(extractor.call_count(), 1);
    assert_eq!(assessor.call_count(), 1);
}

#[tokio::test]
async fn test_assessor_timeout() {
    let pipeline = AssessmentPipeline::new(
        FakeExtractor::returning(extraction(&[], 0, ImpairmentSignal::none())),
        FakeAssessor::with(Behavior::Hang, true),
    )
    .with_timeouts(PipelineTimeouts {
        extraction: Duration::from_secs(5),
        assessment: Duration::from_millis(50),
    });

    let err = pipeline.assess(TEXT, None).await.unwrap_err();
    assert!(matches!(err, ScreenError::AssessorUnavailable { .. }));
}

#[tokio::test]
async fn test_health_combinations() {
    let cases = [
        (true, true, OverallStatus::Healthy),
        (true, false, OverallStatus::Degraded),
        (false, true, OverallStatus::Degraded),
        (false, false, OverallStatus::Unhealthy),
    ];

    for (extractor_up, assessor_up, expected) in cases {
        let pipeline = AssessmentPipeline::new(
            FakeExtractor::with(Behavior::Fail(None), extractor_up),
            FakeAssessor::with(Behavior::Fail(None), assessor_up),
        );
        let report = pipeline.health().await;
        assert_eq!(report.status, expected);
        assert_eq!(report.extractor.is_healthy(), extractor_up);
        assert_eq!(report.assessor.is_healthy(), assessor_up);
    }
}
