//! Inbound request validation

use serde::Deserialize;
use uuid::Uuid;

pub const MIN_TEXT_CHARS: usize = 10;
pub const MAX_TEXT_CHARS: usize = 5000;

/// Optional client context; accepted and ignored by the engine
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetadata {
    pub timestamp: Option<String>,
    pub user_agent: Option<String>,
}

/// Body of `POST /api/v1/assessment/analyze`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub session_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<ClientMetadata>,
}

/// A request that passed every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAnalyzeRequest {
    pub text: String,
    pub session_id: Option<String>,
}

impl AnalyzeRequest {
    /// Check every rule and report all failures together
    pub fn validate(self) -> std::result::Result<ValidAnalyzeRequest, Vec<String>> {
        let mut problems = Vec::new();

        let text = self.text.map(|t| t.trim().to_string());
        match &text {
            None => problems.push("Text is required".to_string()),
            Some(t) if t.is_empty() => problems.push("Text cannot be empty".to_string()),
            Some(t) if t.chars().count() < MIN_TEXT_CHARS => {
                problems.push(format!("Text must be at least {} characters long", MIN_TEXT_CHARS))
            }
            Some(t) if t.chars().count() > MAX_TEXT_CHARS => {
                problems.push(format!("Text cannot exceed {} characters", MAX_TEXT_CHARS))
            }
            Some(_) => {}
        }

        if let Some(id) = &self.session_id {
            if Uuid::parse_str(id).is_err() {
                problems.push("sessionId must be a valid UUID".to_string());
            }
        }

        match text {
            Some(text) if problems.is_empty() => Ok(ValidAnalyzeRequest {
                text,
                session_id: self.session_id,
            }),
            _ => Err(problems),
        }
    }
}
