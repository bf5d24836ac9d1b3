//! Clinical criteria registry
//!
//! Static, process-lifetime definition of a criteria set: the criteria themselves,
//! the diagnostic thresholds and the severity bands. Nothing here is mutated after
//! startup; every request reads the same table.

pub mod mdd;

pub use mdd::MDD_CRITERIA;

use serde::Serialize;
use std::fmt;

/// One diagnosable symptom category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    /// Criterion code (e.g. "A1")
    pub code: &'static str,

    /// Canonical symptom id shared with the extractor (e.g. "depressed_mood")
    pub symptom_id: &'static str,

    /// Display name
    pub name: &'static str,

    /// Detection of this criterion raises the crisis flag
    pub crisis: bool,
}

/// Severity band names, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Subthreshold,
    Mild,
    Moderate,
    Severe,
}

impl SeverityLevel {
    /// Lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Subthreshold => "subthreshold",
            SeverityLevel::Mild => "mild",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Severe => "severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive symptom-count range mapped to a severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityBand {
    pub level: SeverityLevel,
    pub min: usize,
    pub max: usize,
    pub description: &'static str,
}

impl SeverityBand {
    /// Display form of the range, e.g. "5-6"
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Complete definition of one criteria set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    pub required_symptom_count: usize,
    pub required_duration_days: u32,

    /// Codes of which at least one must be detected for a positive result
    pub core_codes: &'static [&'static str],

    /// Criteria in fixed table order
    pub criteria: &'static [Criterion],

    /// Ascending, contiguous bands starting at 0
    pub severity_bands: &'static [SeverityBand],

    pub exclusion_criteria: &'static [&'static str],
}

impl CriteriaDefinition {
    /// Number of criteria in the table
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Look up a criterion by its code
    pub fn criterion(&self, code: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.code == code)
    }

    /// Look up a criterion by canonical symptom id
    pub fn by_symptom_id(&self, symptom_id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.symptom_id == symptom_id)
    }

    /// Whether `code` is one of the core criteria
    pub fn is_core(&self, code: &str) -> bool {
        self.core_codes.contains(&code)
    }

    /// Band for a detected-symptom count
    ///
    /// The last band absorbs every count at or above its minimum, so the lookup
    /// is total over the non-negative integers.
    ///
    /// # Panics
    ///
    /// Panics if `severity_bands` is empty; `check_invariants` rejects such a table.
    pub fn band_for_count(&self, count: usize) -> &SeverityBand {
        self.severity_bands
            .iter()
            .rev()
            .find(|band| count >= band.min)
            .unwrap_or(&self.severity_bands[0])
    }

    /// Band definition for a level
    pub fn band(&self, level: SeverityLevel) -> &SeverityBand {
        self.severity_bands
            .iter()
            .find(|band| band.level == level)
            .unwrap_or_else(|| self.band_for_count(0))
    }

    /// Check the structural invariants of the table
    ///
    /// Codes and symptom ids are unique, core codes and the crisis criterion exist,
    /// and the bands start at zero and are contiguous without overlap.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        for (i, a) in self.criteria.iter().enumerate() {
            for b in &self.criteria[i + 1..] {
                if a.code == b.code {
                    return Err(format!("duplicate criterion code {}", a.code));
                }
                if a.symptom_id == b.symptom_id {
                    return Err(format!("duplicate symptom id {}", a.symptom_id));
                }
            }
        }

        match self.criteria.iter().filter(|c| c.crisis).count() {
            0 => return Err("no crisis criterion in the table".to_string()),
            1 => {}
            n => return Err(format!("{} crisis criteria, expected one", n)),
        }

        if self.core_codes.is_empty() {
            return Err("at least one core criterion is required".to_string());
        }
        for code in self.core_codes {
            if self.criterion(code).is_none() {
                return Err(format!("core code {} is not in the table", code));
            }
        }

        let first = self
            .severity_bands
            .first()
            .ok_or_else(|| "severity bands are empty".to_string())?;
        if first.min != 0 {
            return Err(format!("first band starts at {}, expected 0", first.min));
        }
        for band in self.severity_bands {
            if band.max < band.min {
                return Err(format!("band {} has an inverted range", band.level));
            }
        }
        for pair in self.severity_bands.windows(2) {
            if pair[1].min != pair[0].max + 1 || pair[1].level <= pair[0].level {
                return Err(format!(
                    "bands {} and {} are not contiguous and ascending",
                    pair[0].level, pair[1].level
                ));
            }
        }

        Ok(())
    }
}
