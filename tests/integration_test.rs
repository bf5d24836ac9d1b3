//! Integration tests for mdd-screener
//!
//! Wires configuration, criteria and pipeline together without any collaborator running.

use mdd_screener::config::Config;
use mdd_screener::criteria::{CriteriaDefinition, MDD_CRITERIA};
use mdd_screener::pipeline::{PipelineEvent, PipelineState};
use mdd_screener::{AssessmentPipeline, ScreenError};
use std::io::Write;

#[test]
fn test_criteria_table_is_consistent() {
    assert_eq!(MDD_CRITERIA.check_invariants(), Ok(()));
    assert_eq!(MDD_CRITERIA.required_symptom_count, 5);
    assert_eq!(MDD_CRITERIA.required_duration_days, 14);
}

#[test]
fn test_pipeline_from_default_config() {
    let config = Config::defaults();
    let pipeline = AssessmentPipeline::from_config(&config);
    assert!(pipeline.is_ok());
    assert_eq!(pipeline.unwrap().criteria().id, "mdd");
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
host = "127.0.0.1"
port = 4000
cors_origin = "http://localhost:5173"

[extractor]
url = "http://nlp:8000"
timeout_ms = 5000

[assessor]
url = "http://rag:8001"
timeout_ms = 90000

[logging]
level = "debug"
"#
    )
    .unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    assert_eq!(config.extractor.timeout_ms, 5000);
    assert_eq!(config.assessor.url, "http://rag:8001");
    assert!(AssessmentPipeline::from_config(&config).is_ok());
}

#[test]
fn test_pipeline_rejects_table_without_bands() {
    let broken: &'static CriteriaDefinition = Box::leak(Box::new(CriteriaDefinition {
        severity_bands: &[],
        ..MDD_CRITERIA
    }));
    let pipeline = AssessmentPipeline::from_config(&Config::defaults()).unwrap();

    let err = pipeline.with_criteria(broken).unwrap_err();
    assert!(matches!(err, ScreenError::ConfigError(_)));
    assert!(err.to_string().contains("severity bands are empty"));
}

#[test]
fn test_pipeline_accepts_valid_table() {
    let pipeline = AssessmentPipeline::from_config(&Config::defaults())
        .unwrap()
        .with_criteria(&MDD_CRITERIA)
        .unwrap();
    assert_eq!(pipeline.criteria().required_symptom_count, 5);
}

#[tokio::test]
async fn test_health_with_nothing_running_is_unhealthy() {
    let mut config = Config::defaults();
    // Nothing listens on port 9 (discard) in the test environment
    config.extractor.url = "http://127.0.0.1:9".to_string();
    config.assessor.url = "http://127.0.0.1:9".to_string();
    config.extractor.timeout_ms = 500;
    config.assessor.timeout_ms = 500;

    let report = AssessmentPipeline::from_config(&config).unwrap().health().await;
    assert!(!report.is_healthy());
    assert!(report.extractor.error.is_some());
    assert!(report.assessor.error.is_some());
}

#[test]
fn test_pipeline_state_machine() {
    let state = PipelineState::Received.transition(PipelineEvent::Start).unwrap();
    assert_eq!(state, PipelineState::Extracting);
    assert!(!state.is_terminal());
}
