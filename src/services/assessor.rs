//! Narrative assessor client
//!
//! `POST /rag/query` on the retrieval-augmented assessment collaborator. The
//! narrative is mandatory for a report, so a failure here fails the request.

use super::types::{AssessmentRequest, NarrativeAssessment};
use super::{build_client, endpoint, probe, read_envelope, Collaborator, ProbeResult};
use crate::config::CollaboratorConfig;
use crate::errors::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Produces the clinical narrative for a text and its mapped symptoms
#[async_trait]
pub trait NarrativeAssessor: Send + Sync {
    /// Query the assessor; any failure is `AssessorUnavailable`
    async fn assess(&self, request: &AssessmentRequest) -> Result<NarrativeAssessment>;

    /// Probe the service; a healthy probe carries the service's own health body
    async fn health(&self) -> ProbeResult;
}

/// reqwest-backed assessor
#[derive(Debug, Clone)]
pub struct HttpNarrativeAssessor {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpNarrativeAssessor {
    pub fn new(config: &CollaboratorConfig) -> Result<Self> {
        Self::with_config(&config.url, config.timeout())
    }

    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl NarrativeAssessor for HttpNarrativeAssessor {
    async fn assess(&self, request: &AssessmentRequest) -> Result<NarrativeAssessment> {
        let url = endpoint(&self.base_url, "/rag/query");
        tracing::info!(symptoms = request.symptoms.len(), "requesting narrative assessment");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Collaborator::Assessor.transport(e, self.timeout))?;

        let narrative: NarrativeAssessment = read_envelope(Collaborator::Assessor, response, self.timeout)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "narrative assessment failed");
                e
            })?;

        tracing::info!(sources = narrative.sources.len(), "narrative assessment received");
        Ok(narrative)
    }

    async fn health(&self) -> ProbeResult {
        probe(&self.client, Collaborator::Assessor, &self.base_url).await
    }
}
