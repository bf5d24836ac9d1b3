//! Diagnosis data model
//!
//! Inputs arrive from the symptom extractor (`DetectedSymptom`, `ImpairmentSignal`);
//! everything else is derived per request and discarded with the response.

use crate::criteria::SeverityLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symptom reported by the extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSymptom {
    /// Canonical symptom id (e.g. "fatigue")
    pub symptom_id: String,

    /// Extractor confidence in [0, 1]
    pub confidence: f64,

    /// Matched evidence phrases, in match order
    #[serde(default)]
    pub matched_phrases: Vec<String>,

    /// Sentence the match was found in
    #[serde(default)]
    pub sentence_context: Option<String>,

    /// Match type tag (phrase, token, keyword, ...)
    #[serde(default)]
    pub match_type: Option<String>,

    /// Extractor's own detection flag
    #[serde(default = "default_true")]
    pub detected: bool,

    /// Extractor marked the match as negated
    #[serde(default)]
    pub is_negated: bool,
}

fn default_true() -> bool {
    true
}

impl DetectedSymptom {
    /// Positive detection with no evidence detail
    pub fn new(symptom_id: impl Into<String>, confidence: f64) -> Self {
        Self {
            symptom_id: symptom_id.into(),
            confidence,
            matched_phrases: Vec::new(),
            sentence_context: None,
            match_type: None,
            detected: true,
            is_negated: false,
        }
    }

    /// Attach evidence phrases
    pub fn with_evidence(mut self, phrases: &[&str]) -> Self {
        self.matched_phrases = phrases.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Whether this entry counts as a positive detection
    pub fn is_positive(&self) -> bool {
        self.detected && !self.is_negated
    }
}

/// Severity tag of the functional-impairment signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImpairmentSeverity {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

impl ImpairmentSeverity {
    /// Lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpairmentSeverity::None => "none",
            ImpairmentSeverity::Mild => "mild",
            ImpairmentSeverity::Moderate => "moderate",
            ImpairmentSeverity::Severe => "severe",
        }
    }
}

impl From<String> for ImpairmentSeverity {
    /// Unknown tags read as `none`
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mild" => ImpairmentSeverity::Mild,
            "moderate" => ImpairmentSeverity::Moderate,
            "severe" => ImpairmentSeverity::Severe,
            _ => ImpairmentSeverity::None,
        }
    }
}

impl From<ImpairmentSeverity> for String {
    fn from(value: ImpairmentSeverity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ImpairmentSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Functional-impairment indicator supplied by the extractor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImpairmentSignal {
    #[serde(default)]
    pub detected: bool,
    #[serde(default)]
    pub severity: ImpairmentSeverity,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ImpairmentSignal {
    /// No impairment reported
    pub fn none() -> Self {
        Self::default()
    }

    /// Impairment at `severity` with evidence keywords
    pub fn new(severity: ImpairmentSeverity, keywords: &[&str]) -> Self {
        Self {
            detected: severity != ImpairmentSeverity::None,
            severity,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// One criterion joined against the extractor output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedSymptom {
    pub dsm5_code: String,
    pub symptom_id: String,
    pub name: String,
    pub detected: bool,
    pub confidence: f64,
    pub evidence: Vec<String>,
    pub sentence_context: Option<String>,
    pub match_type: Option<String>,
}

/// Confidence tier of a diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Moderate,
    High,
}

impl ConfidenceTier {
    /// Lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Moderate => "moderate",
            ConfidenceTier::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which core symptoms were detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreSymptoms {
    pub depressed_mood: bool,
    pub anhedonia: bool,
}

/// Duration facts used by the duration gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationFacts {
    pub days: u32,
    pub specified: bool,
    pub meets_requirement: bool,
    pub required: u32,
}

/// Outcome of the diagnostic decision rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub condition: String,
    pub code: String,
    pub meets_threshold: bool,
    pub confidence: ConfidenceTier,
    pub criteria_met_count: usize,
    pub required_count: usize,
    pub has_core_symptom: bool,
    pub core_symptoms: CoreSymptoms,
    pub core_codes_detected: Vec<String>,
    pub duration: DurationFacts,
    pub crisis_detected: bool,
}

/// Outcome of the severity evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityResult {
    pub level: SeverityLevel,
    pub score: usize,
    pub score_range: String,
    pub description: String,
    pub functional_impairment: bool,
    pub impairment_severity: ImpairmentSeverity,
    pub impairment_details: Vec<String>,
    /// Band before any impairment escalation
    pub base_level: SeverityLevel,
}

impl SeverityResult {
    /// Whether impairment escalated the count-based band
    pub fn escalated(&self) -> bool {
        self.level != self.base_level
    }
}

/// Recommendation priority; declaration order is display and triage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Moderate,
    General,
}

impl Priority {
    /// Lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Moderate => "moderate",
            Priority::General => "general",
        }
    }
}

/// Recommendation type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    CrisisIntervention,
    ProfessionalEvaluation,
    UrgentCare,
    Monitoring,
    SelfCare,
}

/// One prioritised action item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}
