//! Batch upload models

use serde::Serialize;
use uuid::Uuid;
use urlsentry_core::{BatchReport, Label, LabelDistribution};

#[derive(Debug, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub url: String,
    pub label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub id: Uuid,
    pub filename: Option<String>,
    pub total: usize,
    pub distribution: LabelDistribution,
    pub results: Vec<BatchRow>,
}

impl BatchResponse {
    pub fn new(report: BatchReport, filename: Option<String>, show_confidence: bool) -> Self {
        let results = report
            .records
            .into_iter()
            .map(|r| BatchRow {
                row: r.row,
                url: r.url,
                label: r.label,
                confidence: show_confidence.then_some(r.confidence),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            filename,
            total: report.distribution.total,
            distribution: report.distribution,
            results,
        }
    }
}
