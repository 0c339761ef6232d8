//! Model Types
//!
//! Data structures shared by every classifier backend. No logic.

use serde::{Deserialize, Serialize};

use super::threshold::ThresholdConfig;
use crate::logic::features::LayoutInfo;

// ============================================================================
// LABEL
// ============================================================================

/// Binary verdict. Class index 0 is benign, 1 is malicious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Benign,
    Malicious,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Benign => "Benign",
            Label::Malicious => "Malicious",
        }
    }

    pub fn class_index(&self) -> usize {
        match self {
            Label::Benign => 0,
            Label::Malicious => 1,
        }
    }

    pub fn from_class(class: i64) -> Option<Label> {
        match class {
            0 => Some(Label::Benign),
            1 => Some(Label::Malicious),
            _ => None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Label::Benign => "#10b981",    // Green
            Label::Malicious => "#ef4444", // Red
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benign" | "0" => Ok(Label::Benign),
            "malicious" | "1" => Ok(Label::Malicious),
            other => Err(format!("Unknown label: {}", other)),
        }
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Class probabilities, `[benign, malicious]`
pub type ClassProbabilities = [f64; 2];

/// Prediction output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the chosen label
    pub confidence: f32,
    pub malicious_probability: f32,
}

impl Prediction {
    /// Decide in full precision; the stored probabilities are for display
    pub fn from_probabilities(probs: ClassProbabilities, threshold: &ThresholdConfig) -> Self {
        let malicious_probability = probs[1] as f32;
        if threshold.is_malicious(probs[1]) {
            Self {
                label: Label::Malicious,
                confidence: malicious_probability,
                malicious_probability,
            }
        } else {
            Self {
                label: Label::Benign,
                confidence: probs[0] as f32,
                malicious_probability,
            }
        }
    }
}

// ============================================================================
// MODEL INFO / STATUS
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// "random_forest" or "onnx"
    pub backend: String,
    pub model_path: String,
    /// Number of trees, when the backend knows it
    pub estimators: Option<usize>,
    pub layout: LayoutInfo,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine Status for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub backend: String,
    pub model_path: String,
    pub threshold: f64,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
    pub rows_scored: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!("Malicious".parse::<Label>(), Ok(Label::Malicious));
        assert_eq!(" benign ".parse::<Label>(), Ok(Label::Benign));
        assert_eq!("1".parse::<Label>(), Ok(Label::Malicious));
        assert!("maybe".parse::<Label>().is_err());
    }

    #[test]
    fn test_label_classes() {
        assert_eq!(Label::from_class(0), Some(Label::Benign));
        assert_eq!(Label::from_class(1), Some(Label::Malicious));
        assert_eq!(Label::from_class(2), None);
        assert_eq!(Label::Malicious.class_index(), 1);
    }

    #[test]
    fn test_prediction_confidence_is_chosen_class() {
        let p = Prediction::from_probabilities([0.2, 0.8], &ThresholdConfig::default());
        assert_eq!(p.label, Label::Malicious);
        assert_eq!(p.confidence, 0.8);

        let p = Prediction::from_probabilities([0.7, 0.3], &ThresholdConfig::default());
        assert_eq!(p.label, Label::Benign);
        assert_eq!(p.confidence, 0.7);
        assert_eq!(p.malicious_probability, 0.3);
    }

    #[test]
    fn test_tie_goes_to_benign() {
        let p = Prediction::from_probabilities([0.5, 0.5], &ThresholdConfig::default());
        assert_eq!(p.label, Label::Benign);
    }
}
