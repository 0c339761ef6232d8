//! Batch Export
//!
//! Writes the input table back out with `Prediction` and `Confidence`
//! columns appended, and reads such a file back.

use std::io::{Read, Write};

use super::record::BatchReport;
use super::{BatchError, CONFIDENCE_COLUMN, PREDICTION_COLUMN, URL_COLUMN};
use crate::logic::model::Label;

/// Write `report` as CSV: input columns, then Prediction, then Confidence
pub fn write_csv<W: Write>(report: &BatchReport, output: W) -> Result<(), BatchError> {
    let mut writer = csv::Writer::from_writer(output);

    let mut header = if report.headers.is_empty() {
        vec![URL_COLUMN.to_string()]
    } else {
        report.headers.clone()
    };
    header.push(PREDICTION_COLUMN.to_string());
    header.push(CONFIDENCE_COLUMN.to_string());
    writer.write_record(&header)?;

    for record in &report.records {
        let mut row = if record.cells.is_empty() {
            vec![record.url.clone()]
        } else {
            record.cells.clone()
        };
        row.push(record.label.to_string());
        row.push(format!("{:.4}", record.confidence));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// In-memory CSV, for download responses
pub fn to_csv_bytes(report: &BatchReport) -> Result<Vec<u8>, BatchError> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(buffer)
}

/// Read `(url, label)` pairs back from an exported CSV
pub fn read_predictions<R: Read>(input: R) -> Result<Vec<(String, Label)>, BatchError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let url_index = headers
        .iter()
        .position(|h| h == URL_COLUMN)
        .ok_or_else(|| BatchError::MissingUrlColumn {
            found: headers.iter().map(str::to_string).collect(),
        })?;
    // Appended last, so an input column of the same name is skipped
    let label_index = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == PREDICTION_COLUMN)
        .map(|(i, _)| i)
        .last()
        .ok_or_else(|| BatchError::MissingColumn(PREDICTION_COLUMN.to_string()))?;

    let mut pairs = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let url = record.get(url_index).unwrap_or_default().to_string();
        let raw = record.get(label_index).unwrap_or_default();
        let label = raw.parse::<Label>().map_err(|_| BatchError::InvalidLabel {
            row,
            value: raw.to_string(),
        })?;
        pairs.push((url, label));
    }

    Ok(pairs)
}
