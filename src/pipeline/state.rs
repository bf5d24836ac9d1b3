//! Request lifecycle state machine
//!
//! One assessment request moves strictly forward:
//!
//! ```text
//! Received -> Extracting -> Evaluating -> Assessing -> Done
//!                 |                           |
//!                 +--------> Failed <---------+
//! ```
//!
//! The evaluating stage is pure and cannot fail on well-formed input, so the only
//! failure edges leave the two collaborator stages.

use crate::errors::{Result, ScreenError};
use serde::Serialize;

/// Stage of an assessment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Validated request accepted
    Received,

    /// Waiting on the symptom extractor
    Extracting,

    /// Running mapper, rules, severity and recommendations
    Evaluating,

    /// Waiting on the narrative assessor
    Assessing,

    /// Report assembled (terminal)
    Done,

    /// A collaborator failed (terminal)
    Failed,
}

/// Events that advance a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    Start,
    Extracted,
    ExtractionFailed,
    Evaluated,
    Assessed,
    AssessmentFailed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Advance on `event`
    ///
    /// Terminal states reject every event; a request is never resumed.
    pub fn transition(&self, event: PipelineEvent) -> Result<PipelineState> {
        use PipelineEvent::*;
        use PipelineState::*;

        let next = match (self, event) {
            (Received, Start) => Extracting,

            (Extracting, Extracted) => Evaluating,
            (Extracting, ExtractionFailed) => Failed,

            (Evaluating, Evaluated) => Assessing,

            (Assessing, Assessed) => Done,
            (Assessing, AssessmentFailed) => Failed,

            (from, event) => {
                return Err(ScreenError::InvalidTransition {
                    from: format!("{:?}", from),
                    to: format!("(via {:?})", event),
                    reason: format!("no transition from {:?} on {:?}", from, event),
                });
            }
        };

        Ok(next)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineState::Received => "Received",
            PipelineState::Extracting => "Extracting symptoms",
            PipelineState::Evaluating => "Evaluating criteria",
            PipelineState::Assessing => "Generating clinical assessment",
            PipelineState::Done => "Completed",
            PipelineState::Failed => "Failed",
        }
    }
}
