//! Aggregate statistics over a document set

use crate::core::ordering::UNKNOWN_ARCHIVE_KEY;
use crate::domain::{AttributeKind, DocumentRecognitionResult};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts and ranges over a set of documents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    /// Number of documents
    pub total: usize,
    /// Documents per recognition mode
    pub by_recognition_type: BTreeMap<String, usize>,
    /// Documents per archive number
    pub by_archive: BTreeMap<String, usize>,
    /// Documents per fund
    pub by_fund: BTreeMap<String, usize>,
    /// Distinct cases (full archive codes)
    pub cases: usize,
    /// Documents with no archive code
    pub without_archive_code: usize,
    /// Documents carrying at least one attribute of each kind
    pub attribute_coverage: BTreeMap<String, usize>,
    /// Mean document confidence, 0 for an empty set
    pub average_confidence: f64,
    /// Earliest processing date
    pub earliest_processing_date: Option<DateTime<FixedOffset>>,
    /// Latest processing date
    pub latest_processing_date: Option<DateTime<FixedOffset>>,
}

impl DocumentStats {
    /// Collect statistics in one pass
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_report::core::stats::DocumentStats;
    /// use archive_report::domain::{DocumentRecognitionResult, RecognitionType};
    ///
    /// let document = DocumentRecognitionResult::builder()
    ///     .file_name("01-0203-0745-000002_00000001.jpg")
    ///     .recognition_type(RecognitionType::Full)
    ///     .confidence(0.8)
    ///     .build()
    ///     .unwrap();
    ///
    /// let stats = DocumentStats::collect(&[document]);
    /// assert_eq!(stats.total, 1);
    /// assert_eq!(stats.by_fund["0203"], 1);
    /// ```
    pub fn collect(documents: &[DocumentRecognitionResult]) -> Self {
        let mut stats = Self {
            total: documents.len(),
            ..Self::default()
        };
        let mut cases = std::collections::BTreeSet::new();
        let mut confidence_sum = 0.0;

        for document in documents {
            *stats
                .by_recognition_type
                .entry(document.recognition_type.to_string())
                .or_default() += 1;

            match &document.archive_code {
                Some(code) => {
                    *stats.by_archive.entry(code.archive_id().to_string()).or_default() += 1;
                    *stats.by_fund.entry(code.fund().to_string()).or_default() += 1;
                    cases.insert(code.full_code());
                }
                None => {
                    stats.without_archive_code += 1;
                    *stats.by_archive.entry(UNKNOWN_ARCHIVE_KEY.to_string()).or_default() += 1;
                }
            }

            for kind in AttributeKind::ALL {
                if document.first_attribute(kind).is_some() {
                    *stats.attribute_coverage.entry(kind.to_string()).or_default() += 1;
                }
            }

            confidence_sum += document.confidence;

            if let Some(date) = document.processing_date {
                stats.earliest_processing_date = Some(match stats.earliest_processing_date {
                    Some(earliest) if earliest <= date => earliest,
                    _ => date,
                });
                stats.latest_processing_date = Some(match stats.latest_processing_date {
                    Some(latest) if latest >= date => latest,
                    _ => date,
                });
            }
        }

        stats.cases = cases.len();
        if stats.total > 0 {
            stats.average_confidence = confidence_sum / stats.total as f64;
        }
        stats
    }

    /// Log the statistics
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            cases = self.cases,
            without_archive_code = self.without_archive_code,
            average_confidence = format!("{:.2}", self.average_confidence),
            "Document statistics"
        );
    }
}
