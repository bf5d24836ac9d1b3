//! Fake collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use mdd_screener::diagnosis::{DetectedSymptom, ImpairmentSeverity, ImpairmentSignal};
use mdd_screener::services::types::{ClinicalAssessment, ExtractionMetadata};
use mdd_screener::services::{
    AssessmentRequest, ExtractionResult, NarrativeAssessment, NarrativeAssessor, ProbeResult, SymptomExtractor,
};
use mdd_screener::{Result, ScreenError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub enum Behavior<T> {
    Return(T),
    Fail(Option<u16>),
    Hang,
}

pub struct FakeExtractor {
    behavior: Behavior<ExtractionResult>,
    healthy: bool,
    pub calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn returning(result: ExtractionResult) -> Arc<Self> {
        Self::with(Behavior::Return(result), true)
    }

    pub fn with(behavior: Behavior<ExtractionResult>, healthy: bool) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            healthy,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SymptomExtractor for FakeExtractor {
    async fn extract(&self, _text: &str) -> Result<ExtractionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Return(result) => Ok(result.clone()),
            Behavior::Fail(status) => Err(ScreenError::ExtractorUnavailable {
                message: "connection refused".to_string(),
                status: *status,
            }),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(ExtractionResult::default())
            }
        }
    }

    async fn health(&self) -> ProbeResult {
        if self.healthy {
            ProbeResult::healthy(None)
        } else {
            ProbeResult::unhealthy("symptom extractor health check failed")
        }
    }
}

pub struct FakeAssessor {
    behavior: Behavior<NarrativeAssessment>,
    healthy: bool,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<AssessmentRequest>>,
}

impl FakeAssessor {
    pub fn ok() -> Arc<Self> {
        Self::with(Behavior::Return(narrative()), true)
    }

    pub fn with(behavior: Behavior<NarrativeAssessment>, healthy: bool) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            healthy,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AssessmentRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrativeAssessor for FakeAssessor {
    async fn assess(&self, request: &AssessmentRequest) -> Result<NarrativeAssessment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.behavior {
            Behavior::Return(narrative) => Ok(narrative.clone()),
            Behavior::Fail(status) => Err(ScreenError::AssessorUnavailable {
                message: "LLM backend unavailable".to_string(),
                status: *status,
            }),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(narrative())
            }
        }
    }

    async fn health(&self) -> ProbeResult {
        if self.healthy {
            ProbeResult::healthy(Some(serde_json::json!({ "status": "healthy" })))
        } else {
            ProbeResult::unhealthy("narrative assessor health check failed")
        }
    }
}

pub fn narrative() -> NarrativeAssessment {
    NarrativeAssessment {
        assessment: ClinicalAssessment {
            clinical_narrative: "The narrative describes persistent low mood.".to_string(),
            ..ClinicalAssessment::default()
        },
        ..NarrativeAssessment::default()
    }
}

/// Extraction reporting `ids` at confidence 0.8
pub fn extraction(ids: &[&str], duration_days: u32, impairment: ImpairmentSignal) -> ExtractionResult {
    ExtractionResult {
        symptoms: ids
            .iter()
            .map(|id| DetectedSymptom::new(*id, 0.8).with_evidence(&["evidence"]))
            .collect(),
        metadata: ExtractionMetadata {
            duration_days: Some(duration_days),
            functional_impairment: impairment,
            processing_time_ms: Some(12.5),
            tokens_count: Some(40),
        },
        summary: None,
    }
}

pub fn severe_impairment() -> ImpairmentSignal {
    ImpairmentSignal::new(ImpairmentSeverity::Severe, &["can't work", "stopped seeing friends"])
}

pub const ALL_NINE: [&str; 9] = [
    "depressed_mood",
    "anhedonia",
    "weight_change",
    "sleep_disturbance",
    "psychomotor",
    "fatigue",
    "worthlessness",
    "concentration",
    "suicidal_ideation",
];
