//! CSV upload extraction and scoring

use std::sync::Arc;

use axum::{body::Bytes, extract::Multipart};
use urlsentry_core::{run_csv, BatchReport, InferenceEngine};

use crate::{AppError, AppResult};

/// Form field carrying the CSV
const FILE_FIELD: &str = "file";

pub struct Upload {
    pub filename: Option<String>,
    pub data: Bytes,
}

/// Pull the `file` part out of a multipart body, skipping other fields
pub async fn read_csv(mut multipart: Multipart) -> AppResult<Upload> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::UploadError("Please upload a CSV file.".to_string()));
        }

        tracing::debug!("Received upload {:?} ({} bytes)", filename, data.len());
        return Ok(Upload { filename, data });
    }

    Err(AppError::UploadError(format!("Missing '{}' field", FILE_FIELD)))
}

/// Run the batch off the async runtime
pub async fn score(engine: Arc<InferenceEngine>, data: Bytes) -> AppResult<BatchReport> {
    let report = tokio::task::spawn_blocking(move || run_csv(&engine, data.as_ref())).await??;
    Ok(report)
}
