//! Explain Module - Per-feature breakdown of a prediction
//!
//! Shows the extracted values next to the importances the model artifact
//! exposes. Computes nothing beyond what the model already reports.

pub mod types;
pub mod engine;

pub use types::{ExplainResult, FeatureContribution};
pub use engine::explain;
