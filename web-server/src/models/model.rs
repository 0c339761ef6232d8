//! Model metadata models

use serde::Serialize;
use urlsentry_core::{EngineStatus, ModelInfo};

#[derive(Debug, Serialize)]
pub struct FeatureImportance {
    pub name: &'static str,
    pub importance: f32,
}

#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub info: ModelInfo,
    pub status: EngineStatus,
    /// Sorted by importance DESC; empty when the artifact has none
    pub feature_importances: Vec<FeatureImportance>,
}
