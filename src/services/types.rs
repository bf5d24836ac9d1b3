//! Wire types for the collaborator services
//!
//! Responses are read leniently: absent optional fields default rather than fail,
//! and unknown fields are ignored.

use crate::diagnosis::{DetectedSymptom, ImpairmentSignal, MappedSymptom};
use serde::{Deserialize, Serialize};

/// `{ success, data, error | detail }` envelope shared by both collaborators
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Text preprocessing switches sent with every extraction
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessingOptions {
    pub remove_punctuation: bool,
    pub lowercase: bool,
    pub lemmatize: bool,
}

impl Default for PreprocessingOptions {
    fn default() -> Self {
        Self {
            remove_punctuation: false,
            lowercase: false,
            lemmatize: true,
        }
    }
}

/// Extraction context
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionContext {
    pub language: String,
    pub preprocessing_options: PreprocessingOptions,
}

impl Default for ExtractionContext {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            preprocessing_options: PreprocessingOptions::default(),
        }
    }
}

/// Body of `POST /nlp/extract-symptoms`
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRequest {
    pub text: String,
    pub context: ExtractionContext,
}

impl ExtractionRequest {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            context: ExtractionContext::default(),
        }
    }
}

/// Extraction metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractionMetadata {
    /// Days of symptom duration; 0 or absent when the text does not say
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub functional_impairment: ImpairmentSignal,
    #[serde(default)]
    pub processing_time_ms: Option<f64>,
    #[serde(default)]
    pub tokens_count: Option<u64>,
}

/// Extractor-side counts, kept for display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    #[serde(default)]
    pub total_symptoms: usize,
    #[serde(default)]
    pub unique_symptoms: usize,
}

/// `data` of a successful extraction
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub symptoms: Vec<DetectedSymptom>,
    #[serde(default)]
    pub metadata: ExtractionMetadata,
    #[serde(default)]
    pub summary: Option<ExtractionSummary>,
}

impl ExtractionResult {
    /// Reported duration, 0 when unspecified
    pub fn duration_days(&self) -> u32 {
        self.metadata.duration_days.unwrap_or(0)
    }

    pub fn impairment(&self) -> &ImpairmentSignal {
        &self.metadata.functional_impairment
    }
}

/// Context passed to the assessor alongside the mapped symptoms
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMetadata {
    pub duration_days: u32,
    pub duration_specified: bool,
    pub functional_impairment: ImpairmentSignal,
}

/// Body of `POST /rag/query`
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRequest {
    pub text: String,
    pub symptoms: Vec<MappedSymptom>,
    pub metadata: AssessmentMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DsmReference {
    #[serde(default)]
    pub criteria_code: String,
    #[serde(default)]
    pub criteria_text: String,
    #[serde(default)]
    pub relevance: String,
    #[serde(default)]
    pub evidence_strength: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifferentialConsideration {
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub dsm5_code: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub distinguishing_features: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedAssessment {
    #[serde(default)]
    pub instrument: String,
    #[serde(default)]
    pub purpose: String,
}

/// The assessor's clinical narrative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalAssessment {
    #[serde(default)]
    pub clinical_narrative: String,
    #[serde(default)]
    pub dsm_references: Vec<DsmReference>,
    #[serde(default)]
    pub differential_considerations: Vec<DifferentialConsideration>,
    #[serde(default)]
    pub severity_rationale: String,
    #[serde(default)]
    pub recommended_assessments: Vec<RecommendedAssessment>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub protective_factors: Vec<String>,
    #[serde(default)]
    pub confidence_notes: String,
}

/// Retrieved reference passage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub disorder: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub excerpt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessorMetrics {
    #[serde(default)]
    pub embedding_ms: f64,
    #[serde(default)]
    pub retrieval_ms: f64,
    #[serde(default)]
    pub llm_ms: f64,
    #[serde(default)]
    pub total_ms: f64,
    #[serde(default)]
    pub chunks_retrieved: usize,
}

/// `data` of a successful narrative query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeAssessment {
    #[serde(default)]
    pub assessment: ClinicalAssessment,
    #[serde(default)]
    pub sources: Vec<SourceReference>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
    #[serde(default)]
    pub metrics: Option<AssessorMetrics>,
}
