//! Symptom extractor client
//!
//! `POST /nlp/extract-symptoms` on the NLP collaborator.

use super::types::{ExtractionRequest, ExtractionResult};
use super::{build_client, endpoint, probe, read_envelope, Collaborator, ProbeResult};
use crate::config::CollaboratorConfig;
use crate::errors::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Turns free text into detected symptoms and metadata
#[async_trait]
pub trait SymptomExtractor: Send + Sync {
    /// Extract symptoms; any failure is `ExtractorUnavailable`
    async fn extract(&self, text: &str) -> Result<ExtractionResult>;

    /// Probe the service
    async fn health(&self) -> ProbeResult;
}

/// reqwest-backed extractor
#[derive(Debug, Clone)]
pub struct HttpSymptomExtractor {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpSymptomExtractor {
    /// Create a client from collaborator settings
    pub fn new(config: &CollaboratorConfig) -> Result<Self> {
        Self::with_config(&config.url, config.timeout())
    }

    /// Create a client for `base_url` with a per-call timeout
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl SymptomExtractor for HttpSymptomExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractionResult> {
        let url = endpoint(&self.base_url, "/nlp/extract-symptoms");
        tracing::info!(chars = text.chars().count(), "calling symptom extractor");

        let response = self
            .client
            .post(&url)
            .json(&ExtractionRequest::new(text))
            .send()
            .await
            .map_err(|e| Collaborator::Extractor.transport(e, self.timeout))?;

        let result: ExtractionResult = read_envelope(Collaborator::Extractor, response, self.timeout)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "symptom extraction failed");
                e
            })?;

        tracing::info!(
            symptoms = result.symptoms.len(),
            duration_days = result.duration_days(),
            "symptoms extracted"
        );
        Ok(result)
    }

    async fn health(&self) -> ProbeResult {
        probe(&self.client, Collaborator::Extractor, &self.base_url).await
    }
}
