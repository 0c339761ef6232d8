use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    pub value: f32,
    /// Model-reported importance, if the artifact carries it
    pub importance: Option<f32>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResult {
    /// Sorted by importance DESC when importances are known, else schema order
    pub contributions: Vec<FeatureContribution>,
    pub has_importances: bool,
}
