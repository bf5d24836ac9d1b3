//! Combined collaborator health
//!
//! Both probes run concurrently and each is reported on its own, so one outage
//! never hides the other's status.

use crate::services::{NarrativeAssessor, ProbeResult, SymptomExtractor};
use serde::Serialize;
use std::fmt;
use std::time::Instant;

/// Overall status across all probed collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every collaborator is healthy
    Healthy,
    /// At least one, but not every, collaborator is healthy
    Degraded,
    /// No collaborator is healthy
    Unhealthy,
}

impl OverallStatus {
    /// Combine individual probe outcomes
    pub fn from_probes(probes: &[&ProbeResult]) -> Self {
        let healthy = probes.iter().filter(|p| p.is_healthy()).count();
        if !probes.is_empty() && healthy == probes.len() {
            OverallStatus::Healthy
        } else if healthy > 0 {
            OverallStatus::Degraded
        } else {
            OverallStatus::Unhealthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Healthy => "healthy",
            OverallStatus::Degraded => "degraded",
            OverallStatus::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health of both collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: OverallStatus,
    pub extractor: ProbeResult,
    pub assessor: ProbeResult,
    pub response_time_ms: u64,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == OverallStatus::Healthy
    }
}

/// Probe both collaborators concurrently
pub async fn check(extractor: &dyn SymptomExtractor, assessor: &dyn NarrativeAssessor) -> HealthReport {
    let started = Instant::now();
    let (extractor, assessor) = tokio::join!(extractor.health(), assessor.health());
    let status = OverallStatus::from_probes(&[&extractor, &assessor]);

    if status != OverallStatus::Healthy {
        tracing::warn!(%status, "collaborator health degraded");
    }

    HealthReport {
        status,
        extractor,
        assessor,
        response_time_ms: started.elapsed().as_millis() as u64,
    }
}
