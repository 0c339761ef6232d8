//! Batch Runner
//!
//! CSV table in, one prediction per row out. Rows are extracted
//! independently, scored in a single bulk call, and zipped back by position.

use std::io::Read;

use super::record::{BatchRecord, BatchReport};
use super::{BatchError, URL_COLUMN};
use crate::logic::model::InferenceEngine;

/// Score every row of a CSV that has a `url` column.
///
/// A missing `url` column aborts before anything is scored. Malformed URLs
/// are scored like any other string. Any read or inference error aborts the
/// whole batch: there are no partial results.
pub fn run_csv<R: Read>(engine: &InferenceEngine, input: R) -> Result<BatchReport, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let url_index = headers
        .iter()
        .position(|h| h == URL_COLUMN)
        .ok_or_else(|| BatchError::MissingUrlColumn {
            found: headers.clone(),
        })?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let urls: Vec<String> = rows
        .iter()
        .map(|cells| cells.get(url_index).cloned().unwrap_or_default())
        .collect();

    let report = score(engine, headers, urls, rows)?;
    log::info!(
        "Batch scored: {} rows, {} malicious",
        report.len(),
        report.distribution.malicious
    );

    Ok(report)
}

/// Score a plain list of URLs as a one-column table
pub fn run_urls(engine: &InferenceEngine, urls: Vec<String>) -> Result<BatchReport, BatchError> {
    let rows = urls.iter().map(|u| vec![u.clone()]).collect();
    score(engine, vec![URL_COLUMN.to_string()], urls, rows)
}

fn score(
    engine: &InferenceEngine,
    headers: Vec<String>,
    urls: Vec<String>,
    rows: Vec<Vec<String>>,
) -> Result<BatchReport, BatchError> {
    let predictions = engine.classify_batch(&urls)?;

    let records = urls
        .into_iter()
        .zip(rows)
        .zip(predictions)
        .enumerate()
        .map(|(i, ((url, cells), prediction))| BatchRecord::new(i, url, prediction, cells))
        .collect();

    Ok(BatchReport::new(headers, records))
}
