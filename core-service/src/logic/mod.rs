//! Logic Module - Extraction, inference and batch engines
//!
//! - `features/` - URL → feature vector, versioned layout
//! - `model/` - classifier trait, backends, inference engine
//! - `explain/` - per-feature breakdown for the UI
//! - `batch/` - CSV batch scoring and export

pub mod features;
pub mod model;
pub mod explain;
pub mod batch;
