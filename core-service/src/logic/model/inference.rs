//! Inference Engine - Classifier Adapter
//!
//! The trained model is an opaque artifact produced elsewhere. Backends
//! implement [`Classifier`]; the [`InferenceEngine`] pairs one backend with
//! the extractor for its schema, the decision threshold, and latency stats.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ndarray::Array2;
use thiserror::Error;

use super::threshold::ThresholdConfig;
use super::types::{ClassProbabilities, EngineStatus, Label, ModelInfo, Prediction};
use crate::logic::explain::{self, ExplainResult};
use crate::logic::features::{FeatureExtractor, FeatureSchema, FeatureVector, LayoutError};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure to load or validate a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Failed to read model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Model backend error: {0}")]
    Backend(String),
}

/// Failure while scoring a batch
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Feature matrix has {actual} columns, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Model returned {actual} rows for {expected} inputs")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {0}")]
    Backend(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A pre-trained binary classifier over one feature schema.
///
/// Implementations are read-only after load and shared across requests.
pub trait Classifier: Send + Sync {
    fn info(&self) -> &ModelInfo;

    /// Feature order the artifact was trained on
    fn schema(&self) -> &FeatureSchema;

    /// `[benign, malicious]` probabilities per row
    fn predict_proba(&self, features: &Array2<f32>) -> Result<Vec<ClassProbabilities>, InferenceError>;

    /// Argmax labels per row (ties go to class 0)
    fn predict(&self, features: &Array2<f32>) -> Result<Vec<Label>, InferenceError> {
        Ok(self
            .predict_proba(features)?
            .into_iter()
            .map(|p| if p[1] > p[0] { Label::Malicious } else { Label::Benign })
            .collect())
    }

    /// Per-feature weights aligned with `schema()`, if the artifact has them
    fn feature_importances(&self) -> Option<&[f32]> {
        None
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Extraction + classification for one loaded model
pub struct InferenceEngine {
    classifier: Arc<dyn Classifier>,
    extractor: FeatureExtractor,
    threshold: ThresholdConfig,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    rows_scored: AtomicU64,
}

/// One URL's features and prediction
#[derive(Debug, Clone)]
pub struct UrlVerdict {
    pub url: String,
    pub features: FeatureVector,
    pub prediction: Prediction,
}

impl InferenceEngine {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        let extractor = FeatureExtractor::new(classifier.schema().clone());
        Self {
            classifier,
            extractor,
            threshold: ThresholdConfig::default(),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
            rows_scored: AtomicU64::new(0),
        }
    }

    pub fn with_threshold(mut self, threshold: ThresholdConfig) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.extractor.schema()
    }

    pub fn threshold(&self) -> ThresholdConfig {
        self.threshold
    }

    /// Score a prepared feature matrix
    pub fn predict_matrix(&self, features: &Array2<f32>) -> Result<Vec<Prediction>, InferenceError> {
        let expected = self.schema().len();
        if features.ncols() != expected {
            return Err(InferenceError::ShapeMismatch {
                expected,
                actual: features.ncols(),
            });
        }

        let start = Instant::now();
        let probabilities = self.classifier.predict_proba(features)?;

        if probabilities.len() != features.nrows() {
            return Err(InferenceError::RowCountMismatch {
                expected: features.nrows(),
                actual: probabilities.len(),
            });
        }

        let predictions = probabilities
            .into_iter()
            .map(|p| Prediction::from_probabilities(p, &self.threshold))
            .collect();

        // Track metrics
        let elapsed = start.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        self.rows_scored.fetch_add(features.nrows() as u64, Ordering::Relaxed);

        log::debug!("Scored {} rows in {}us", features.nrows(), elapsed);

        Ok(predictions)
    }

    /// Score one extracted vector
    pub fn predict_vector(&self, vector: &FeatureVector) -> Result<Prediction, InferenceError> {
        vector.validate(self.schema())?;

        let matrix = crate::logic::features::vector::stack(std::slice::from_ref(vector), vector.len());
        self.predict_matrix(&matrix)?
            .into_iter()
            .next()
            .ok_or(InferenceError::RowCountMismatch { expected: 1, actual: 0 })
    }

    /// Extract and score a single URL
    pub fn classify(&self, url: &str) -> Result<UrlVerdict, InferenceError> {
        let features = self.extractor.extract(url);
        let prediction = self.predict_vector(&features)?;

        Ok(UrlVerdict {
            url: url.to_string(),
            features,
            prediction,
        })
    }

    /// Extract every URL, then score them in one bulk call
    pub fn classify_batch<S: AsRef<str>>(&self, urls: &[S]) -> Result<Vec<Prediction>, InferenceError> {
        let matrix = self.extractor.extract_matrix(urls);
        self.predict_matrix(&matrix)
    }

    /// Feature values paired with the model's importances
    pub fn explain(&self, vector: &FeatureVector) -> ExplainResult {
        explain::explain(vector, self.classifier.feature_importances())
    }

    pub fn status(&self) -> EngineStatus {
        let info = self.classifier.info();
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            backend: info.backend.clone(),
            model_path: info.model_path.clone(),
            threshold: self.threshold.malicious_threshold,
            avg_latency_ms: avg,
            inference_count: count,
            rows_scored: self.rows_scored.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("backend", &self.classifier.info().backend)
            .field("schema_version", &self.schema().version())
            .field("threshold", &self.threshold)
            .finish()
    }
}
