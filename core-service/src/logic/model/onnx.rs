//! ONNX Backend - ONNX Runtime Integration
//!
//! Runs a classifier converted to ONNX (e.g. with skl2onnx, `zipmap=False`).
//! Input is one `[N, F]` float tensor in the canonical feature order;
//! outputs are a label tensor and an `[N, 2]` probability tensor.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::inference::{Classifier, InferenceError, ModelError};
use super::types::{ClassProbabilities, ModelInfo};
use crate::logic::features::FeatureSchema;

pub struct OnnxClassifier {
    /// `run` needs `&mut Session`
    session: Mutex<Session>,
    info: ModelInfo,
    schema: FeatureSchema,
    label_output: Option<String>,
    proba_output: Option<String>,
}

impl OnnxClassifier {
    pub fn load(path: &Path, schema: FeatureSchema) -> Result<Self, ModelError> {
        let display = path.display().to_string();
        log::info!("Loading ONNX model from: {}", display);

        if !path.exists() {
            return Err(ModelError::NotFound(display));
        }

        let session = Session::builder()
            .map_err(|e| ModelError::Backend(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Backend(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| ModelError::Backend(format!("Failed to load model: {}", e)))?;

        let outputs: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let proba_output = outputs.iter().find(|n| n.contains("prob")).cloned();
        let label_output = outputs
            .iter()
            .find(|n| n.contains("label"))
            .or_else(|| outputs.first())
            .cloned();

        if proba_output.is_none() && label_output.is_none() {
            return Err(ModelError::Invalid("ONNX model defines no outputs".to_string()));
        }

        log::info!("ONNX model loaded successfully (outputs: {:?})", outputs);

        let info = ModelInfo {
            backend: "onnx".to_string(),
            model_path: display,
            estimators: None,
            layout: schema.info(),
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self {
            session: Mutex::new(session),
            info,
            schema,
            label_output,
            proba_output,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict_proba(&self, features: &Array2<f32>) -> Result<Vec<ClassProbabilities>, InferenceError> {
        let rows = features.nrows();
        if rows == 0 {
            return Ok(Vec::new());
        }

        let input_tensor = Value::from_array(features.clone())
            .map_err(|e| InferenceError::Backend(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Backend(format!("Inference failed: {}", e)))?;

        if let Some(name) = &self.proba_output {
            let output = outputs
                .get(name)
                .ok_or_else(|| InferenceError::Backend(format!("Missing output {}", name)))?;
            let data = output
                .try_extract_tensor::<f32>()
                .map_err(|e| InferenceError::Backend(format!("Extract error: {}", e)))?
                .1;

            if data.len() != rows * 2 {
                return Err(InferenceError::Backend(format!(
                    "Expected {} probabilities, got {}",
                    rows * 2,
                    data.len()
                )));
            }

            return Ok(data.chunks_exact(2).map(|c| [f64::from(c[0]), f64::from(c[1])]).collect());
        }

        // Label-only model: one-hot the predicted class
        let name = self
            .label_output
            .as_ref()
            .ok_or_else(|| InferenceError::Backend("No output defined".to_string()))?;
        let output = outputs
            .get(name)
            .ok_or_else(|| InferenceError::Backend(format!("Missing output {}", name)))?;
        let labels = output
            .try_extract_tensor::<i64>()
            .map_err(|e| InferenceError::Backend(format!("Extract error: {}", e)))?
            .1;

        Ok(labels
            .iter()
            .map(|&class| if class == 1 { [0.0, 1.0] } else { [1.0, 0.0] })
            .collect())
    }
}
