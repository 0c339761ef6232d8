use std::cmp::Ordering;

use super::types::{ExplainResult, FeatureContribution};
use crate::logic::features::FeatureVector;

/// Pair each feature value with the model's importance for that column.
///
/// `importances` must be aligned with the vector's schema; a length
/// mismatch is treated as "no importances".
pub fn explain(vector: &FeatureVector, importances: Option<&[f32]>) -> ExplainResult {
    let importances = importances.filter(|i| i.len() == vector.len());

    let mut contributions: Vec<FeatureContribution> = vector
        .entries()
        .enumerate()
        .map(|(i, (feature, value))| FeatureContribution {
            name: feature.name().to_string(),
            value,
            importance: importances.map(|imp| imp[i]),
            description: feature.description().to_string(),
        })
        .collect();

    if importances.is_some() {
        contributions.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(Ordering::Equal)
        });
    }

    ExplainResult {
        contributions,
        has_importances: importances.is_some(),
    }
}
