//! Criteria mapper
//!
//! Joins extractor detections onto the criteria table. The output always has one
//! entry per criterion, in table order, whatever the extractor emitted and in
//! whatever order it emitted it.

use crate::criteria::CriteriaDefinition;
use crate::diagnosis::types::{DetectedSymptom, MappedSymptom};
use std::collections::HashMap;

/// Map detected symptoms onto every criterion of `criteria`
///
/// Negated or explicitly undetected entries are ignored, as are symptom ids the
/// table does not know. When the extractor reports the same id more than once the
/// highest-confidence entry wins; ties keep the earlier entry.
pub fn map_symptoms(criteria: &CriteriaDefinition, detected: &[DetectedSymptom]) -> Vec<MappedSymptom> {
    let mut by_id: HashMap<&str, &DetectedSymptom> = HashMap::with_capacity(detected.len());

    for symptom in detected.iter().filter(|s| s.is_positive()) {
        if criteria.by_symptom_id(&symptom.symptom_id).is_none() {
            tracing::debug!(symptom_id = %symptom.symptom_id, "ignoring symptom outside the criteria table");
            continue;
        }
        by_id
            .entry(symptom.symptom_id.as_str())
            .and_modify(|current| {
                if symptom.confidence > current.confidence {
                    *current = symptom;
                }
            })
            .or_insert(symptom);
    }

    criteria
        .criteria
        .iter()
        .map(|criterion| match by_id.get(criterion.symptom_id) {
            Some(hit) => MappedSymptom {
                dsm5_code: criterion.code.to_string(),
                symptom_id: criterion.symptom_id.to_string(),
                name: criterion.name.to_string(),
                detected: true,
                confidence: hit.confidence.clamp(0.0, 1.0),
                evidence: hit.matched_phrases.clone(),
                sentence_context: hit.sentence_context.clone(),
                match_type: hit.match_type.clone(),
            },
            None => MappedSymptom {
                dsm5_code: criterion.code.to_string(),
                symptom_id: criterion.symptom_id.to_string(),
                name: criterion.name.to_string(),
                detected: false,
                confidence: 0.0,
                evidence: Vec::new(),
                sentence_context: None,
                match_type: None,
            },
        })
        .collect()
}

/// Number of detected entries in a mapped list
pub fn detected_count(mapped: &[MappedSymptom]) -> usize {
    mapped.iter().filter(|s| s.detected).count()
}
