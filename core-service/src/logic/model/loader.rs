//! Model Loader
//!
//! Picks a backend from the artifact's file extension.

use std::path::Path;
use std::sync::Arc;

use super::forest::ForestClassifier;
use super::inference::{Classifier, ModelError};

/// Load the classifier artifact at `path`.
///
/// `.json` → random forest; `.onnx` → ONNX Runtime (needs the `onnx` feature).
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let classifier: Arc<dyn Classifier> = match extension.as_str() {
        "json" => Arc::new(ForestClassifier::load(path)?),
        #[cfg(feature = "onnx")]
        "onnx" => Arc::new(super::onnx::OnnxClassifier::load(
            path,
            crate::logic::features::FeatureSchema::canonical(),
        )?),
        other => {
            return Err(ModelError::UnsupportedFormat(format!(
                "'.{}' ({})",
                other,
                path.display()
            )))
        }
    };

    let info = classifier.info();
    log::info!(
        "Loaded {} model from {} ({} features, layout v{} {:08x})",
        info.backend,
        info.model_path,
        info.layout.feature_count,
        info.layout.version,
        info.layout.hash
    );

    Ok(classifier)
}
