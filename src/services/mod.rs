//! Collaborator services
//!
//! The screening core calls two external services it does not implement: the
//! symptom extractor and the narrative assessor. Each sits behind an async trait
//! so the pipeline can run against the HTTP clients here or against fakes.
//!
//! Every call is single-attempt with a per-collaborator timeout. Failures are
//! normalised into `ExtractorUnavailable` / `AssessorUnavailable` exactly once.

pub mod assessor;
pub mod extractor;
pub mod types;

pub use assessor::{HttpNarrativeAssessor, NarrativeAssessor};
pub use extractor::{HttpSymptomExtractor, SymptomExtractor};
pub use types::{AssessmentRequest, ExtractionResult, NarrativeAssessment};

use crate::errors::{Result, ScreenError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use types::ApiEnvelope;

/// Which collaborator a call went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Extractor,
    Assessor,
}

impl Collaborator {
    pub fn name(&self) -> &'static str {
        match self {
            Collaborator::Extractor => "symptom extractor",
            Collaborator::Assessor => "narrative assessor",
        }
    }

    /// Build the unavailable error for this collaborator
    pub fn unavailable(&self, message: impl Into<String>, status: Option<u16>) -> ScreenError {
        let message = message.into();
        match self {
            Collaborator::Extractor => ScreenError::ExtractorUnavailable { message, status },
            Collaborator::Assessor => ScreenError::AssessorUnavailable { message, status },
        }
    }

    /// Map a transport failure (connect, timeout, body read)
    pub fn transport(&self, err: reqwest::Error, timeout: Duration) -> ScreenError {
        let message = if err.is_timeout() {
            format!("request timed out after {}ms", timeout.as_millis())
        } else if err.is_connect() {
            format!("could not connect to {}", self.name())
        } else {
            format!("request failed: {}", err)
        };
        self.unavailable(message, err.status().map(|s| s.as_u16()))
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Health of one collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of one health probe; probes never fail, they report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub status: ProbeStatus,
    pub error: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl ProbeResult {
    pub fn healthy(details: Option<serde_json::Value>) -> Self {
        Self {
            status: ProbeStatus::Healthy,
            error: None,
            details,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Unhealthy,
            error: Some(error.into()),
            details: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ProbeStatus::Healthy
    }
}

/// Build a reqwest client with a fixed overall timeout
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ScreenError::HttpError)
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Pull a human-readable message out of an upstream error body
fn upstream_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "error", "message"].iter().find_map(|key| {
        let field = value.get(*key)?;
        match field {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            serde_json::Value::Object(obj) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .or_else(|| Some(field.to_string())),
            other => Some(other.to_string()),
        }
    })
}

/// Read a collaborator response, unwrapping the `{ success, data }` envelope
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    collaborator: Collaborator,
    response: reqwest::Response,
    timeout: Duration,
) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| collaborator.transport(e, timeout))?;

    if !status.is_success() {
        let message = upstream_detail(&body).unwrap_or_else(|| format!("HTTP {}", status));
        return Err(collaborator.unavailable(message, Some(status.as_u16())));
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
        .map_err(|e| collaborator.unavailable(format!("malformed response: {}", e), None))?;

    match envelope.data {
        Some(data) if envelope.success => Ok(data),
        _ => {
            let message = envelope
                .error
                .or(envelope.detail)
                .unwrap_or_else(|| format!("{} returned an unsuccessful response", collaborator));
            Err(collaborator.unavailable(message, None))
        }
    }
}

/// `GET {base}/health` and report, never fail
pub(crate) async fn probe(client: &reqwest::Client, collaborator: Collaborator, base_url: &str) -> ProbeResult {
    let url = endpoint(base_url, "/health");

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            let details = response.json::<serde_json::Value>().await.ok();
            ProbeResult::healthy(details)
        }
        Ok(response) => {
            tracing::warn!(collaborator = %collaborator, status = %response.status(), "health check failed");
            ProbeResult::unhealthy(format!("{} health check failed: HTTP {}", collaborator, response.status()))
        }
        Err(e) => {
            tracing::warn!(collaborator = %collaborator, error = %e, "health check failed");
            ProbeResult::unhealthy(format!("{} health check failed", collaborator))
        }
    }
}
