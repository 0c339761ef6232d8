//! Random Forest Backend
//!
//! Loads a forest exported from the training notebook as JSON. Each tree is
//! stored as parallel node arrays in sklearn's layout:
//!
//! ```text
//! children_left[i]  -1 for a leaf, else index of the "<= threshold" child
//! children_right[i] -1 for a leaf, else index of the "> threshold" child
//! feature[i]        column tested at node i (ignored for leaves)
//! threshold[i]      split value at node i
//! value[i]          [benign, malicious] sample weight reaching node i
//! ```
//!
//! Probabilities are the mean over trees of each leaf's normalised class
//! distribution, as sklearn computes them.

use std::path::Path;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::inference::{Classifier, InferenceError, ModelError};
use super::types::{ClassProbabilities, ModelInfo};
use crate::logic::features::{FeatureSchema, FEATURE_VERSION};

const LEAF: i64 = -1;

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

/// On-disk artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    /// Layout version the feature names belong to
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    /// Optional CRC32 of the layout, checked when present
    #[serde(default)]
    pub layout_hash: Option<u32>,
    pub feature_names: Vec<String>,
    /// Class label of each probability column
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f32>>,
    pub trees: Vec<TreeArrays>,
}

fn default_model_type() -> String {
    "random_forest".to_string()
}

fn default_schema_version() -> u8 {
    FEATURE_VERSION
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// One decision tree as parallel node arrays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl TreeArrays {
    fn validate(&self, index: usize, width: usize) -> Result<(), ModelError> {
        let n = self.children_left.len();
        let invalid = |msg: String| ModelError::Invalid(format!("tree {}: {}", index, msg));

        if n == 0 {
            return Err(invalid("no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(invalid("node arrays have different lengths".to_string()));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);

            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(invalid(format!("node {} has exactly one child", node)));
                }
                let [benign, malicious] = self.value[node];
                if benign < 0.0 || malicious < 0.0 || benign + malicious <= 0.0 {
                    return Err(invalid(format!("leaf {} has no usable class weights", node)));
                }
                continue;
            }

            // Children always come after their parent, which rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(invalid(format!("node {} points to invalid child {}", node, child)));
                }
            }

            let feature = self.feature[node];
            if feature < 0 || feature >= width as i64 {
                return Err(invalid(format!("node {} tests missing feature {}", node, feature)));
            }
            if self.threshold[node].is_nan() {
                return Err(invalid(format!("node {} has a NaN threshold", node)));
            }
        }

        Ok(())
    }

    /// Walk from the root to a leaf; returns the leaf's normalised distribution
    fn leaf_distribution(&self, row: ArrayView1<'_, f32>) -> [f64; 2] {
        let mut node = 0usize;

        while self.children_left[node] != LEAF {
            let value = f64::from(row[self.feature[node] as usize]);
            node = if value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let [benign, malicious] = self.value[node];
        let total = benign + malicious;
        [benign / total, malicious / total]
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct ForestClassifier {
    info: ModelInfo,
    schema: FeatureSchema,
    trees: Vec<TreeArrays>,
    /// Probability column holding the malicious class
    malicious_column: usize,
    importances: Option<Vec<f32>>,
}

impl ForestClassifier {
    pub fn from_artifact(artifact: ForestArtifact, model_path: &str) -> Result<Self, ModelError> {
        if artifact.model_type != "random_forest" {
            return Err(ModelError::UnsupportedFormat(artifact.model_type));
        }

        let schema = FeatureSchema::from_names(artifact.schema_version, &artifact.feature_names)?;
        if let Some(hash) = artifact.layout_hash {
            schema.validate(artifact.schema_version, hash)?;
        }

        let malicious_column = match artifact.classes.as_slice() {
            [0, 1] => 1,
            [1, 0] => 0,
            other => {
                return Err(ModelError::Invalid(format!(
                    "classes must be a permutation of [0, 1], got {:?}",
                    other
                )))
            }
        };

        if artifact.trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".to_string()));
        }
        for (i, tree) in artifact.trees.iter().enumerate() {
            tree.validate(i, schema.len())?;
        }

        if let Some(importances) = &artifact.feature_importances {
            if importances.len() != schema.len() {
                return Err(ModelError::Invalid(format!(
                    "{} feature importances for {} features",
                    importances.len(),
                    schema.len()
                )));
            }
        }

        let info = ModelInfo {
            backend: artifact.model_type.clone(),
            model_path: model_path.to_string(),
            estimators: Some(artifact.trees.len()),
            layout: schema.info(),
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self {
            info,
            schema,
            trees: artifact.trees,
            malicious_column,
            importances: artifact.feature_importances,
        })
    }

    pub fn from_json(json: &str, model_path: &str) -> Result<Self, ModelError> {
        let artifact: ForestArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact, model_path)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ModelError::NotFound(display));
        }

        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: display.clone(),
            source,
        })?;

        Self::from_json(&json, &display)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn row_probabilities(&self, row: ArrayView1<'_, f32>) -> ClassProbabilities {
        let mut sum = [0.0f64; 2];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(row);
            sum[0] += dist[0];
            sum[1] += dist[1];
        }

        let n = self.trees.len() as f64;
        [sum[1 - self.malicious_column] / n, sum[self.malicious_column] / n]
    }
}

impl Classifier for ForestClassifier {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict_proba(&self, features: &Array2<f32>) -> Result<Vec<ClassProbabilities>, InferenceError> {
        if features.ncols() != self.schema.len() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.schema.len(),
                actual: features.ncols(),
            });
        }

        Ok(features.rows().into_iter().map(|row| self.row_probabilities(row)).collect())
    }

    fn feature_importances(&self) -> Option<&[f32]> {
        self.importances.as_deref()
    }
}
