//! Test fixtures: a two-stump forest over the canonical layout.
//!
//! Tree 1 splits on `use_of_ip`, tree 2 on `short_url`:
//!
//! | URL kind        | tree 1 | tree 2 | P(malicious) |
//! |-----------------|--------|--------|--------------|
//! | plain           | 0.1    | 0.3    | 0.2          |
//! | IP literal      | 1.0    | 0.3    | 0.65         |
//! | shortener       | 0.1    | 0.8    | 0.45         |
//! | IP + shortener  | 1.0    | 0.8    | 0.9          |

use std::sync::Arc;

use crate::logic::features::FEATURE_LAYOUT;
use crate::logic::model::{ForestClassifier, InferenceEngine};

pub(crate) fn stump_forest_json() -> String {
    let names: Vec<&str> = FEATURE_LAYOUT.iter().map(|f| f.name()).collect();
    serde_json::json!({
        "model_type": "random_forest",
        "schema_version": 1,
        "feature_names": names,
        "classes": [0, 1],
        "feature_importances": [
            0.05, 0.05, 0.02, 0.03, 0.1, 0.05, 0.02, 0.02, 0.06, 0.02,
            0.04, 0.04, 0.03, 0.07, 0.05, 0.03, 0.2, 0.12
        ],
        "trees": [
            {
                "children_left":  [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature":        [16, -2, -2],
                "threshold":      [0.5, -2.0, -2.0],
                "value":          [[10.0, 10.0], [9.0, 1.0], [0.0, 10.0]]
            },
            {
                "children_left":  [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature":        [17, -2, -2],
                "threshold":      [0.5, -2.0, -2.0],
                "value":          [[10.0, 10.0], [7.0, 3.0], [1.0, 4.0]]
            }
        ]
    })
    .to_string()
}

pub(crate) fn stump_engine() -> InferenceEngine {
    let forest = ForestClassifier::from_json(&stump_forest_json(), "<fixture>")
        .expect("fixture forest is valid");
    InferenceEngine::new(Arc::new(forest))
}
