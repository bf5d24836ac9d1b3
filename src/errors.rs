//! Error types for the screening service
//!
//! Every failure is classified so callers can tell bad input from an
//! unavailable collaborator from a fault inside the engine.

use serde::Serialize;
use thiserror::Error;

/// Status class a caller sees for a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Malformed or out-of-bounds request
    ClientError,

    /// A mandatory collaborator could not be reached or refused the request
    UpstreamUnavailable,

    /// Unexpected fault inside the service
    Internal,
}

impl ErrorClass {
    /// Stable tag used in error envelopes
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::ClientError => "client_error",
            ErrorClass::UpstreamUnavailable => "upstream_unavailable",
            ErrorClass::Internal => "internal",
        }
    }
}

/// Main error type for the screening service
#[derive(Error, Debug)]
pub enum ScreenError {
    /// Request payload rejected before the core runs
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Symptom extraction call failed (transport, timeout or non-success payload)
    #[error("Symptom extractor unavailable: {message}")]
    ExtractorUnavailable {
        message: String,
        status: Option<u16>,
    },

    /// Narrative assessment call failed (transport, timeout or non-success payload)
    #[error("Narrative assessor unavailable: {message}")]
    AssessorUnavailable {
        message: String,
        status: Option<u16>,
    },

    /// Invariant violation inside the pure evaluation stages
    #[error("Internal error: {0}")]
    Internal(String),

    /// Pipeline stepped out of order
    #[error("Invalid state transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScreenError {
    /// Classify the error for the caller
    pub fn class(&self) -> ErrorClass {
        match self {
            ScreenError::InvalidInput(_) => ErrorClass::ClientError,
            ScreenError::ExtractorUnavailable { .. } | ScreenError::AssessorUnavailable { .. } => {
                ErrorClass::UpstreamUnavailable
            }
            _ => ErrorClass::Internal,
        }
    }

    /// HTTP status code the error maps to
    ///
    /// Upstream failures are 502 when the collaborator answered with an error and
    /// 503 when it could not be reached. Its own status stays in `upstream_status`.
    pub fn status_code(&self) -> u16 {
        match self {
            ScreenError::InvalidInput(_) => 400,
            ScreenError::ExtractorUnavailable { status, .. }
            | ScreenError::AssessorUnavailable { status, .. } => match status {
                Some(_) => 502,
                None => 503,
            },
            _ => 500,
        }
    }

    /// Upstream status code, if a collaborator answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ScreenError::ExtractorUnavailable { status, .. }
            | ScreenError::AssessorUnavailable { status, .. } => *status,
            _ => None,
        }
    }

    /// Message safe to show to a caller
    ///
    /// Internal faults are reported generically; the detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self.class() {
            ErrorClass::Internal => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for screening operations
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Convert anyhow errors to ScreenError
impl From<anyhow::Error> for ScreenError {
    fn from(err: anyhow::Error) -> Self {
        ScreenError::Internal(err.to_string())
    }
}
