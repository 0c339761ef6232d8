//! Single-URL prediction models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;
use urlsentry_core::{FeatureContribution, Label, UrlVerdict};

/// HTML form body for `POST /predict`
#[derive(Debug, Deserialize, Default)]
pub struct PredictForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, max = 8192, message = "url must be 1-8192 characters"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub url: String,
    pub label: Label,
    /// Omitted when confidence display is turned off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub malicious_probability: f32,
    pub features: BTreeMap<&'static str, f32>,
    pub layout_version: u8,
    pub layout_hash: u32,
    pub explanation: Vec<FeatureContribution>,
}

impl PredictResponse {
    pub fn new(verdict: UrlVerdict, explanation: Vec<FeatureContribution>, show_confidence: bool) -> Self {
        Self {
            label: verdict.prediction.label,
            confidence: show_confidence.then_some(verdict.prediction.confidence),
            malicious_probability: verdict.prediction.malicious_probability,
            features: verdict.features.to_named(),
            layout_version: verdict.features.version,
            layout_hash: verdict.features.layout_hash,
            explanation,
            url: verdict.url,
        }
    }
}
