//! Assessment report
//!
//! The one artifact returned per request. Built once both collaborators have
//! answered, never persisted.

use crate::diagnosis::{DiagnosisResult, MappedSymptom, Recommendation, SeverityResult};
use crate::services::NarrativeAssessment;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fixed disclaimer attached to every report
pub const DISCLAIMER: &str = "IMPORTANT DISCLAIMER: This assessment is NOT a substitute for professional medical diagnosis. \
It is a screening tool based on DSM-5 criteria and should only be used by qualified mental health professionals \
as part of a comprehensive clinical evaluation. Only a licensed psychiatrist or psychologist can provide an official diagnosis. \
If you or someone you know is in crisis, please contact emergency services or a crisis hotline immediately.";

/// Timing and context facts for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetadata {
    /// Extractor-reported processing time
    pub extraction_ms: Option<f64>,
    pub duration_days: u32,
    pub duration_specified: bool,
    /// Wall-clock time of the whole pipeline
    pub total_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub session_id: String,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub diagnosis: DiagnosisResult,
    pub severity: SeverityResult,
    pub symptoms: Vec<MappedSymptom>,
    pub recommendations: Vec<Recommendation>,
    pub ai_assessment: NarrativeAssessment,
    pub disclaimer: &'static str,
    pub metadata: ProcessingMetadata,
}

impl AssessmentReport {
    /// Detected entries only, in table order
    pub fn detected_symptoms(&self) -> impl Iterator<Item = &MappedSymptom> {
        self.symptoms.iter().filter(|s| s.detected)
    }
}
