//! Decision Threshold Configuration
//!
//! A row is labelled malicious when its malicious-class probability is
//! strictly above the threshold. The default of 0.5 reproduces the model's
//! own argmax decision (ties go to benign).

use serde::{Deserialize, Serialize};

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Malicious probability cutoff (0.0 - 1.0)
    pub malicious_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            malicious_threshold: 0.5,
        }
    }
}

impl ThresholdConfig {
    /// Out-of-range values are clamped into [0, 1]; NaN falls back to the default
    pub fn new(threshold: f64) -> Self {
        if threshold.is_nan() {
            return Self::default();
        }
        Self {
            malicious_threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Compared against the unrounded forest mean
    pub fn is_malicious(&self, malicious_probability: f64) -> bool {
        malicious_probability > self.malicious_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_config() {
        let config = ThresholdConfig::default();
        assert_eq!(config.malicious_threshold, 0.5);
        assert!(config.is_malicious(0.51));
        assert!(!config.is_malicious(0.5));
    }

    #[test]
    fn test_threshold_clamped() {
        assert_eq!(ThresholdConfig::new(1.7).malicious_threshold, 1.0);
        assert_eq!(ThresholdConfig::new(-0.2).malicious_threshold, 0.0);
        assert_eq!(ThresholdConfig::new(f64::NAN), ThresholdConfig::default());
    }

    #[test]
    fn test_comparison_is_not_narrowed() {
        let config = ThresholdConfig::default();
        assert!(config.is_malicious(0.500_000_02));
        assert_eq!(0.500_000_02f64 as f32, 0.5);
        assert!(!ThresholdConfig::new(0.7).is_malicious(0.7));
    }
}
