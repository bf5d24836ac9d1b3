//! Assessment orchestrator
//!
//! Sequences the two mandatory collaborator calls around the local rule engine:
//! extract, evaluate, assess, report. The calls are strictly sequential because
//! the assessor consumes the mapped symptoms. There are no retries; a failed call
//! fails the request once and nothing partial is returned.

use super::health::{self, HealthReport};
use super::state::{PipelineEvent, PipelineState};
use crate::config::Config;
use crate::criteria::{CriteriaDefinition, MDD_CRITERIA};
use crate::diagnosis;
use crate::errors::{Result, ScreenError};
use crate::report::{AssessmentReport, ProcessingMetadata, DISCLAIMER};
use crate::services::types::AssessmentMetadata;
use crate::services::{
    AssessmentRequest, Collaborator, HttpNarrativeAssessor, HttpSymptomExtractor, NarrativeAssessor,
    SymptomExtractor,
};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Per-call time limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTimeouts {
    pub extraction: Duration,
    pub assessment: Duration,
}

impl Default for PipelineTimeouts {
    fn default() -> Self {
        Self {
            extraction: Duration::from_secs(10),
            assessment: Duration::from_secs(60),
        }
    }
}

/// Runs assessments against a pair of collaborators
#[derive(Clone)]
pub struct AssessmentPipeline {
    extractor: Arc<dyn SymptomExtractor>,
    assessor: Arc<dyn NarrativeAssessor>,
    criteria: &'static CriteriaDefinition,
    timeouts: PipelineTimeouts,
}

impl AssessmentPipeline {
    /// Pipeline over the MDD criteria with default timeouts
    pub fn new(extractor: Arc<dyn SymptomExtractor>, assessor: Arc<dyn NarrativeAssessor>) -> Self {
        Self {
            extractor,
            assessor,
            criteria: &MDD_CRITERIA,
            timeouts: PipelineTimeouts::default(),
        }
    }

    /// Pipeline backed by the HTTP collaborators in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let extractor = HttpSymptomExtractor::new(&config.extractor)?;
        let assessor = HttpNarrativeAssessor::new(&config.assessor)?;

        Ok(Self::new(Arc::new(extractor), Arc::new(assessor)).with_timeouts(PipelineTimeouts {
            extraction: config.extractor.timeout(),
            assessment: config.assessor.timeout(),
        }))
    }

    pub fn with_timeouts(mut self, timeouts: PipelineTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Swap the criteria table; rejects a table that fails its structural checks
    pub fn with_criteria(mut self, criteria: &'static CriteriaDefinition) -> Result<Self> {
        criteria.check_invariants().map_err(ScreenError::ConfigError)?;
        self.criteria = criteria;
        Ok(self)
    }

    pub fn criteria(&self) -> &'static CriteriaDefinition {
        self.criteria
    }

    /// Run one assessment
    ///
    /// `session_id` defaults to the generated request id.
    pub async fn assess(&self, text: &str, session_id: Option<String>) -> Result<AssessmentReport> {
        let request_id = Uuid::new_v4().to_string();
        let session_id = session_id.unwrap_or_else(|| request_id.clone());
        let span = tracing::info_span!("assessment", request_id = %request_id, session_id = %session_id);

        self.run(text, request_id, session_id).instrument(span).await
    }

    async fn run(&self, text: &str, request_id: String, session_id: String) -> Result<AssessmentReport> {
        let started = Instant::now();
        let mut state = PipelineState::Received.transition(PipelineEvent::Start)?;
        tracing::info!(stage = state.display_name(), "assessment started");

        let extraction = match bounded(
            Collaborator::Extractor,
            self.timeouts.extraction,
            self.extractor.extract(text),
        )
        .await
        {
            Ok(extraction) => {
                state = state.transition(PipelineEvent::Extracted)?;
                extraction
            }
            Err(e) => {
                state = state.transition(PipelineEvent::ExtractionFailed)?;
                tracing::error!(stage = state.display_name(), error = %e, "symptom extraction failed");
                return Err(e);
            }
        };

        let duration_days = extraction.duration_days();
        let impairment = extraction.impairment().clone();
        let evaluation = diagnosis::evaluate(self.criteria, &extraction.symptoms, duration_days, &impairment);
        state = state.transition(PipelineEvent::Evaluated)?;

        tracing::info!(
            detected = evaluation.diagnosis.criteria_met_count,
            meets_threshold = evaluation.diagnosis.meets_threshold,
            severity = %evaluation.severity.level,
            "rule evaluation finished"
        );
        if evaluation.diagnosis.crisis_detected {
            tracing::warn!("crisis indicator detected");
        }

        let request = AssessmentRequest {
            text: text.to_string(),
            symptoms: evaluation.symptoms.clone(),
            metadata: AssessmentMetadata {
                duration_days,
                duration_specified: evaluation.diagnosis.duration.specified,
                functional_impairment: impairment,
            },
        };

        let narrative = match bounded(
            Collaborator::Assessor,
            self.timeouts.assessment,
            self.assessor.assess(&request),
        )
        .await
        {
            Ok(narrative) => {
                state = state.transition(PipelineEvent::Assessed)?;
                narrative
            }
            Err(e) => {
                state = state.transition(PipelineEvent::AssessmentFailed)?;
                tracing::error!(stage = state.display_name(), error = %e, "narrative assessment failed");
                return Err(e);
            }
        };

        let total_ms = started.elapsed().as_millis() as u64;
        tracing::info!(stage = state.display_name(), total_ms, "assessment complete");

        Ok(AssessmentReport {
            session_id,
            request_id,
            timestamp: Utc::now(),
            diagnosis: evaluation.diagnosis,
            severity: evaluation.severity,
            symptoms: evaluation.symptoms,
            recommendations: evaluation.recommendations,
            ai_assessment: narrative,
            disclaimer: DISCLAIMER,
            metadata: ProcessingMetadata {
                extraction_ms: extraction.metadata.processing_time_ms,
                duration_days,
                duration_specified: duration_days > 0,
                total_ms,
            },
        })
    }

    /// Probe both collaborators concurrently
    pub async fn health(&self) -> HealthReport {
        health::check(self.extractor.as_ref(), self.assessor.as_ref()).await
    }
}

/// Bound a collaborator call; elapsing counts as the collaborator being unavailable
async fn bounded<T>(
    collaborator: Collaborator,
    limit: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(collaborator.unavailable(
            format!("request timed out after {}ms", limit.as_millis()),
            None,
        )),
    }
}

impl std::fmt::Debug for AssessmentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentPipeline")
            .field("criteria", &self.criteria.id)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

