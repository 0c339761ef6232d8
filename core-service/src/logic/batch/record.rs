use serde::{Deserialize, Serialize};

use crate::logic::model::{Label, Prediction};

/// One input row and its prediction
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchRecord {
    /// Zero-based position in the input table
    pub row: usize,
    pub url: String,
    pub label: Label,
    /// Probability of the chosen label
    pub confidence: f32,
    pub malicious_probability: f32,

    /// Original cells, in input column order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<String>,
}

impl BatchRecord {
    pub fn new(row: usize, url: String, prediction: Prediction, cells: Vec<String>) -> Self {
        Self {
            row,
            url,
            label: prediction.label,
            confidence: prediction.confidence,
            malicious_probability: prediction.malicious_probability,
            cells,
        }
    }
}

/// Label counts over a batch
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelDistribution {
    pub total: usize,
    pub benign: usize,
    pub malicious: usize,
}

impl LabelDistribution {
    pub fn from_records(records: &[BatchRecord]) -> Self {
        let malicious = records.iter().filter(|r| r.label == Label::Malicious).count();
        Self {
            total: records.len(),
            benign: records.len() - malicious,
            malicious,
        }
    }

    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::Benign => self.benign,
            Label::Malicious => self.malicious,
        }
    }

    /// Share of `label` in percent; 0 for an empty batch
    pub fn percent(&self, label: Label) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(label) as f32 * 100.0 / self.total as f32
    }
}

/// Result of one batch run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Input header row
    pub headers: Vec<String>,
    pub records: Vec<BatchRecord>,
    pub distribution: LabelDistribution,
}

impl BatchReport {
    pub fn new(headers: Vec<String>, records: Vec<BatchRecord>) -> Self {
        let distribution = LabelDistribution::from_records(&records);
        Self {
            headers,
            records,
            distribution,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
