//! Severity evaluation
//!
//! The count-based band comes from the criteria table. Severe functional impairment
//! can then raise it by exactly one step, but only through the rows of
//! [`ESCALATIONS`]: impairment compounds symptom burden, it never substitutes for it.

use crate::criteria::{CriteriaDefinition, SeverityLevel};
use crate::diagnosis::mapper::detected_count;
use crate::diagnosis::types::{ImpairmentSeverity, ImpairmentSignal, MappedSymptom, SeverityResult};

/// One permitted impairment escalation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escalation {
    pub from: SeverityLevel,
    pub to: SeverityLevel,
    /// Detected-symptom count required for the step
    pub min_count: usize,
}

/// Every escalation path that exists; anything not listed does not escalate
pub const ESCALATIONS: [Escalation; 2] = [
    Escalation {
        from: SeverityLevel::Mild,
        to: SeverityLevel::Moderate,
        min_count: 5,
    },
    Escalation {
        from: SeverityLevel::Moderate,
        to: SeverityLevel::Severe,
        min_count: 7,
    },
];

/// Impairment severity that triggers escalation
pub const ESCALATING_IMPAIRMENT: ImpairmentSeverity = ImpairmentSeverity::Severe;

/// Apply the escalation table to a base band
pub fn escalate(base: SeverityLevel, count: usize, impairment: ImpairmentSeverity) -> SeverityLevel {
    if impairment != ESCALATING_IMPAIRMENT {
        return base;
    }
    ESCALATIONS
        .iter()
        .find(|rule| rule.from == base && count >= rule.min_count)
        .map(|rule| rule.to)
        .unwrap_or(base)
}

/// Evaluate severity for a mapped symptom list and impairment signal
pub fn evaluate(criteria: &CriteriaDefinition, symptoms: &[MappedSymptom], impairment: &ImpairmentSignal) -> SeverityResult {
    let count = detected_count(symptoms);
    let base_level = criteria.band_for_count(count).level;
    let level = escalate(base_level, count, impairment.severity);

    if level != base_level {
        tracing::info!(
            from = %base_level,
            to = %level,
            count,
            "upgraded severity due to severe functional impairment"
        );
    }

    let band = criteria.band(level);

    SeverityResult {
        level,
        score: count,
        score_range: band.range_label(),
        description: band.description.to_string(),
        functional_impairment: impairment.detected,
        impairment_severity: impairment.severity,
        impairment_details: impairment.keywords.clone(),
        base_level,
    }
}
