//! Model Module - Classifier Adapters
//!
//! The trained classifier is an opaque artifact. Backends implement
//! `Classifier`; the rest of the crate only sees the trait.

pub mod types;
pub mod threshold;
pub mod inference;
pub mod forest;
pub mod loader;
#[cfg(feature = "onnx")]
pub mod onnx;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export common types
pub use types::{ClassProbabilities, EngineStatus, Label, ModelInfo, Prediction};
pub use threshold::ThresholdConfig;
pub use inference::{Classifier, InferenceEngine, InferenceError, ModelError, UrlVerdict};
pub use forest::{ForestArtifact, ForestClassifier};
pub use loader::load_classifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
