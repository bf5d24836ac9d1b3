//! Diagnostic rule evaluation
//!
//! Applies the threshold, core-symptom and duration gates to a mapped symptom list
//! and derives the confidence tier and crisis flag.
//!
//! An unspecified duration (0 days) does not block a positive result; only a
//! specified duration below the requirement does. It also never earns `high`
//! confidence, because `high` requires the duration requirement to be met.

use crate::criteria::mdd::{ANHEDONIA_CODE, DEPRESSED_MOOD_CODE};
use crate::criteria::CriteriaDefinition;
use crate::diagnosis::types::{ConfidenceTier, CoreSymptoms, DiagnosisResult, DurationFacts, MappedSymptom};

/// Evaluate the diagnostic decision rule
pub fn evaluate(criteria: &CriteriaDefinition, symptoms: &[MappedSymptom], duration_days: u32) -> DiagnosisResult {
    let detected: Vec<&MappedSymptom> = symptoms.iter().filter(|s| s.detected).collect();
    let detected_count = detected.len();
    let is_detected = |code: &str| detected.iter().any(|s| s.dsm5_code == code);

    let core_codes_detected: Vec<String> = criteria
        .core_codes
        .iter()
        .filter(|code| is_detected(code))
        .map(|code| code.to_string())
        .collect();
    let has_core_symptom = !core_codes_detected.is_empty();

    let meets_count_threshold = detected_count >= criteria.required_symptom_count;

    let duration_specified = duration_days > 0;
    let meets_duration = duration_days >= criteria.required_duration_days;

    let meets_threshold =
        meets_count_threshold && has_core_symptom && (meets_duration || !duration_specified);

    let confidence = if meets_threshold && meets_duration {
        ConfidenceTier::High
    } else if meets_count_threshold && has_core_symptom {
        ConfidenceTier::Moderate
    } else {
        ConfidenceTier::Low
    };

    let crisis_detected = criteria
        .criteria
        .iter()
        .filter(|c| c.crisis)
        .any(|c| is_detected(c.code));

    DiagnosisResult {
        condition: criteria.name.to_string(),
        code: criteria.code.to_string(),
        meets_threshold,
        confidence,
        criteria_met_count: detected_count,
        required_count: criteria.required_symptom_count,
        has_core_symptom,
        core_symptoms: CoreSymptoms {
            depressed_mood: is_detected(DEPRESSED_MOOD_CODE),
            anhedonia: is_detected(ANHEDONIA_CODE),
        },
        core_codes_detected,
        duration: DurationFacts {
            days: duration_days,
            specified: duration_specified,
            meets_requirement: meets_duration,
            required: criteria.required_duration_days,
        },
        crisis_detected,
    }
}
