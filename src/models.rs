use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One metric over time: index-aligned labels (days or week starts) and counts.
///
/// Construction validates the invariants once; afterwards the series is read-only.
/// Order is whatever the collector produced (chronological ascending) and is never
/// re-sorted here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series from parallel arrays.
    ///
    /// ### Errors
    /// - `LengthMismatch` when the arrays differ in length
    /// - `InvalidValue` for negative or non-finite counts
    /// - `DuplicateLabel` when a label repeats
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self, LoadError> {
        if labels.len() != values.len() {
            return Err(LoadError::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(LoadError::InvalidValue {
                index,
                value: *value,
            });
        }
        let mut seen = HashSet::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if !seen.insert(label.as_str()) {
                return Err(LoadError::DuplicateLabel {
                    index,
                    label: label.clone(),
                });
            }
        }
        Ok(Self { labels, values })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest value, or `None` for an empty series.
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Iterate `(label, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Raw record of the public recent-downloads endpoint (`data` array item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub date: String,
    pub downloads: u64,
}

/// Response body of the recent-downloads endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentDownloads {
    pub data: Vec<DownloadRecord>,
}

/// One display row of the download table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRow {
    pub date: String,
    pub downloads: u64,
}

impl From<DownloadRecord> for DownloadRow {
    fn from(r: DownloadRecord) -> Self {
        Self {
            date: r.date,
            downloads: r.downloads,
        }
    }
}

/// Display table filled by the remote loader. Rows are only ever appended as a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadTable {
    element_id: String,
    rows: Vec<DownloadRow>,
}

impl DownloadTable {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            rows: Vec::new(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn rows(&self) -> &[DownloadRow] {
        &self.rows
    }

    /// Append a complete batch of rows, preserving their order.
    pub fn append(&mut self, rows: Vec<DownloadRow>) {
        self.rows.extend(rows);
    }
}
