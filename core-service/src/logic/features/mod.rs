//! Features Module - URL Feature Extraction Engine
//!
//! Turns a URL string into the numeric vector the classifier was trained on.
//! The schema in `layout.rs` is the single source of truth for feature order.

pub mod layout;
pub mod url_parts;
pub mod charclass;
pub mod suffix;
pub mod shorteners;
pub mod vector;
pub mod extractor;


// Re-export common types
pub use layout::{
    Feature, FeatureSchema, LayoutError, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};
pub use vector::FeatureVector;
pub use extractor::{extract_features, FeatureExtractor};
