//! Rule-based diagnosis
//!
//! Pure, synchronous evaluation of extractor output against a criteria table:
//! mapping, the diagnostic rule, severity and recommendations. Nothing here
//! performs I/O or fails on well-formed input.

pub mod mapper;
pub mod recommendations;
pub mod rules;
pub mod severity;
pub mod types;

pub use mapper::{detected_count, map_symptoms};
pub use types::{
    ConfidenceTier, CoreSymptoms, DetectedSymptom, DiagnosisResult, DurationFacts, ImpairmentSeverity,
    ImpairmentSignal, MappedSymptom, Priority, Recommendation, RecommendationKind, SeverityResult,
};

use crate::criteria::CriteriaDefinition;

/// Everything the rule engine derives for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub symptoms: Vec<MappedSymptom>,
    pub diagnosis: DiagnosisResult,
    pub severity: SeverityResult,
    pub recommendations: Vec<Recommendation>,
}

/// Run mapper, rule evaluator, severity evaluator and recommendation generator in order
pub fn evaluate(
    criteria: &CriteriaDefinition,
    detected: &[DetectedSymptom],
    duration_days: u32,
    impairment: &ImpairmentSignal,
) -> Evaluation {
    let symptoms = map_symptoms(criteria, detected);
    let diagnosis = rules::evaluate(criteria, &symptoms, duration_days);
    let severity = severity::evaluate(criteria, &symptoms, impairment);
    let recommendations = recommendations::generate(&diagnosis, &severity);

    tracing::debug!(
        detected = diagnosis.criteria_met_count,
        meets_threshold = diagnosis.meets_threshold,
        severity = %severity.level,
        crisis = diagnosis.crisis_detected,
        "rule evaluation complete"
    );

    Evaluation {
        symptoms,
        diagnosis,
        severity,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{SeverityLevel, MDD_CRITERIA};

    #[test]
    fn test_all_nine_scenario() {
        let detected: Vec<DetectedSymptom> = MDD_CRITERIA
            .criteria
            .iter()
            .map(|c| DetectedSymptom::new(c.symptom_id, 0.9))
            .collect();
        let eval = evaluate(&MDD_CRITERIA, &detected, 21, &ImpairmentSignal::none());

        assert!(eval.diagnosis.meets_threshold);
        assert_eq!(eval.diagnosis.confidence, ConfidenceTier::High);
        assert_eq!(eval.severity.level, SeverityLevel::Severe);
        assert_eq!(eval.recommendations.first().map(|r| r.priority), Some(Priority::Critical));
        assert_eq!(eval.symptoms.len(), 9);
    }

    #[test]
    fn test_empty_extraction() {
        let eval = evaluate(&MDD_CRITERIA, &[], 0, &ImpairmentSignal::none());
        assert!(!eval.diagnosis.meets_threshold);
        assert!(!eval.diagnosis.crisis_detected);
        assert_eq!(eval.severity.level, SeverityLevel::Subthreshold);
        assert_eq!(eval.recommendations.len(), 1);
    }
}
