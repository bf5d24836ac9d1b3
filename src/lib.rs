//! mdd-screener - DSM-5 Major Depressive Disorder screening service
//!
//! Screens free-text symptom narratives against a fixed criteria table and
//! produces a structured report: criteria met, severity band, confidence, crisis
//! flag and prioritised recommendations.
//!
//! # Architecture
//!
//! - **criteria**: static criteria table and severity bands
//! - **diagnosis**: pure rule engine (mapper, rules, severity, recommendations)
//! - **services**: symptom extractor and narrative assessor clients
//! - **pipeline**: request orchestration and collaborator health
//! - **server** / **cli**: HTTP and terminal surfaces

pub mod config;
pub mod criteria;
pub mod diagnosis;
pub mod errors;
pub mod pipeline;
pub mod report;
pub mod services;

pub mod cli;
pub mod display;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use errors::{ErrorClass, Result, ScreenError};
pub use pipeline::AssessmentPipeline;
pub use report::AssessmentReport;
