//! Export result and reporting
//!
//! This module defines the metadata returned alongside the report bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// MIME type of exported reports
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// Metadata about one export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// Generated file name
    pub file_name: String,

    /// Output format, always `csv`
    pub format: String,

    /// Number of data rows
    pub records_count: usize,

    /// Number of columns
    pub fields_count: usize,

    /// Size of the encoded report in bytes, BOM included
    pub file_size: usize,

    /// Export instant
    pub export_date: DateTime<Utc>,

    /// Time spent rendering the report
    #[serde(skip)]
    pub duration: Duration,
}

impl ExportResult {
    /// Create a new export result
    pub fn new(
        file_name: String,
        records_count: usize,
        fields_count: usize,
        file_size: usize,
        export_date: DateTime<Utc>,
    ) -> Self {
        Self {
            file_name,
            format: "csv".to_string(),
            records_count,
            fields_count,
            file_size,
            export_date,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of rendered cells
    pub fn cells_count(&self) -> usize {
        self.records_count * self.fields_count
    }

    /// Log the result
    pub fn log_summary(&self) {
        tracing::info!(
            file_name = %self.file_name,
            format = %self.format,
            records = self.records_count,
            fields = self.fields_count,
            file_size = self.file_size,
            duration_ms = self.duration.as_millis() as u64,
            "Report export completed"
        );
    }
}
