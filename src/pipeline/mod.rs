//! Request orchestration and collaborator health

pub mod health;
pub mod orchestrator;
pub mod state;

pub use health::{HealthReport, OverallStatus};
pub use orchestrator::{AssessmentPipeline, PipelineTimeouts};
pub use state::{PipelineEvent, PipelineState};
