//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Carries the schema version and layout hash it was built with, so a
//! vector can be checked against a model's schema before it is scored.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::layout::{Feature, FeatureSchema, LayoutError};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature identities in schema order
    pub features: Vec<Feature>,
    /// Feature values in schema order
    pub values: Vec<f32>,
}

impl FeatureVector {
    /// Zeroed vector for a schema
    pub fn zeroed(schema: &FeatureSchema) -> Self {
        Self {
            version: schema.version(),
            layout_hash: schema.layout_hash(),
            features: schema.features().to_vec(),
            values: vec![0.0; schema.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn view(&self) -> ArrayView1<'_, f32> {
        ArrayView1::from(self.values.as_slice())
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn get_feature(&self, feature: Feature) -> Option<f32> {
        self.features
            .iter()
            .position(|&f| f == feature)
            .and_then(|i| self.get(i))
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        Feature::from_name(name).and_then(|f| self.get_feature(f))
    }

    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Validate that this vector was built for `schema`
    pub fn validate(&self, schema: &FeatureSchema) -> Result<(), LayoutError> {
        schema.validate(self.version, self.layout_hash)
    }

    /// Named mapping, for display and logging
    pub fn to_named(&self) -> BTreeMap<&'static str, f32> {
        self.features
            .iter()
            .zip(&self.values)
            .map(|(f, v)| (f.name(), *v))
            .collect()
    }

    /// Ordered (name, value) pairs
    pub fn entries(&self) -> impl Iterator<Item = (Feature, f32)> + '_ {
        self.features.iter().copied().zip(self.values.iter().copied())
    }
}

// ============================================================================
// FEATURE MATRIX
// ============================================================================

/// Stack vectors into a `[rows, width]` matrix in input order.
///
/// Every vector must have `width` values; the extractor guarantees this for
/// vectors it produced from one schema.
pub fn stack(vectors: &[FeatureVector], width: usize) -> Array2<f32> {
    let mut matrix = Array2::<f32>::zeros((vectors.len(), width));

    for (mut row, vector) in matrix.rows_mut().into_iter().zip(vectors) {
        for (slot, value) in row.iter_mut().zip(&vector.values) {
            *slot = *value;
        }
    }

    matrix
}
