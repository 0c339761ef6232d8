//! URL Sentry Core
//!
//! Feature extraction, classifier adapters and batch scoring for malicious
//! URL detection.
//!
//! ```text
//!   URL ──► features::FeatureExtractor ──► FeatureVector ─┐
//!                                                         ▼
//!   CSV ──► batch::run_csv ──► Array2<f32> ──► model::Classifier ──► Prediction
//! ```

pub mod logic;

pub use logic::batch::{
    run_csv, run_urls, to_csv_bytes, BatchError, BatchRecord, BatchReport, LabelDistribution,
};
pub use logic::explain::{ExplainResult, FeatureContribution};
pub use logic::features::{
    extract_features, Feature, FeatureExtractor, FeatureSchema, FeatureVector, LayoutError,
    LayoutInfo,
};
pub use logic::model::{
    load_classifier, Classifier, EngineStatus, ForestClassifier, InferenceEngine, InferenceError,
    Label, ModelError, ModelInfo, Prediction, ThresholdConfig, UrlVerdict,
};
