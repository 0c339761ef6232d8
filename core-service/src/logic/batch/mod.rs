//! Batch Module - CSV batch prediction
//!
//! Scores a table of URLs in one bulk call and exports the results.
//! Nothing is persisted: reports live for one request.

pub mod record;
pub mod runner;
pub mod export;


use thiserror::Error;

use crate::logic::model::InferenceError;

pub use record::{BatchRecord, BatchReport, LabelDistribution};
pub use runner::{run_csv, run_urls};
pub use export::{read_predictions, to_csv_bytes, write_csv};

/// Required input column
pub const URL_COLUMN: &str = "url";
/// Appended label column
pub const PREDICTION_COLUMN: &str = "Prediction";
/// Appended confidence column
pub const CONFIDENCE_COLUMN: &str = "Confidence";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV must contain a 'url' column (found: {found:?})")]
    MissingUrlColumn { found: Vec<String> },

    #[error("CSV must contain a '{0}' column")]
    MissingColumn(String),

    #[error("Invalid label '{value}' on row {row}")]
    InvalidLabel { row: usize, value: String },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}
