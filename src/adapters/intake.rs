//! Upload-stage intake records
//!
//! The upload stage produces a flat record per file: the file name, the
//! recognized text and a bag of extracted attribute strings, with the archive
//! code as free text. [`IntakeAdapter`] converts it into the canonical
//! [`DocumentRecognitionResult`].

use crate::domain::{
    extract_archive_code_from_path, ArchiveCode, ArchiveReference, AttributeKind,
    DocumentPageInfo, DocumentRecognitionResult, RecognitionType, RecognizedAttribute,
    ReportError, Result,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Attribute strings extracted at upload time
///
/// Field names follow the upstream snake_case wire format. Empty strings mean
/// "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAttributes {
    /// Person name
    #[serde(default)]
    pub fio: Option<String>,
    /// Document date
    #[serde(default)]
    pub date: Option<String>,
    /// Address
    #[serde(default)]
    pub address: Option<String>,
    /// Archive code or legacy reference as free text
    #[serde(default)]
    pub archive_code: Option<String>,
    /// Document number
    #[serde(default)]
    pub document_number: Option<String>,
    /// Organization
    #[serde(default)]
    pub organization: Option<String>,
}

impl ExtractedAttributes {
    fn values(&self) -> [(AttributeKind, Option<&str>); 6] {
        [
            (AttributeKind::Fio, self.fio.as_deref()),
            (AttributeKind::Date, self.date.as_deref()),
            (AttributeKind::Address, self.address.as_deref()),
            (AttributeKind::Organization, self.organization.as_deref()),
            (AttributeKind::DocumentNumber, self.document_number.as_deref()),
            (AttributeKind::ArchiveCode, self.archive_code.as_deref()),
        ]
    }
}

/// Flat record produced by the upload stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    /// Scan file name
    pub file_name: String,

    /// Path to the scan, defaults to the file name
    #[serde(default)]
    pub file_path: Option<String>,

    /// Full recognized text
    #[serde(default)]
    pub recognized_text: Option<String>,

    /// Extracted attributes
    #[serde(default)]
    pub extracted_attributes: Option<ExtractedAttributes>,

    /// When the file was processed
    #[serde(default)]
    pub processed_at: Option<DateTime<FixedOffset>>,

    /// Recognition confidence
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl IntakeRecord {
    /// Create a record for a file name
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: None,
            recognized_text: None,
            extracted_attributes: None,
            processed_at: None,
            confidence: None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Converts intake records into canonical documents
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeAdapter {
    default_archive_id: Option<u32>,
}

impl IntakeAdapter {
    /// Create an adapter
    ///
    /// `default_archive_id` completes legacy references, which carry no
    /// archive number.
    pub fn new(default_archive_id: Option<u32>) -> Self {
        Self { default_archive_id }
    }

    /// Resolve the archive code of a record
    ///
    /// The extracted archive code string wins; the file name is the fallback.
    pub fn resolve_archive_code(&self, record: &IntakeRecord) -> Option<ArchiveCode> {
        let from_attributes = record
            .extracted_attributes
            .as_ref()
            .and_then(|attributes| non_empty(attributes.archive_code.as_deref()))
            .and_then(|reference| {
                let code = ArchiveReference::parse(reference).to_archive_code(self.default_archive_id);
                if code.is_none() {
                    tracing::debug!(
                        file_name = %record.file_name,
                        reference = %reference,
                        "Archive reference could not be completed"
                    );
                }
                code
            });

        from_attributes.or_else(|| extract_archive_code_from_path(&record.file_name))
    }

    /// Convert one record
    ///
    /// Records with at least one extracted attribute become attribute
    /// documents; the rest are full-text documents.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] if the confidence is outside [0, 1].
    pub fn adapt(&self, record: &IntakeRecord) -> Result<DocumentRecognitionResult> {
        let confidence = record.confidence.unwrap_or(0.0);
        let archive_code = self.resolve_archive_code(record);

        let attributes: Vec<RecognizedAttribute> = record
            .extracted_attributes
            .iter()
            .flat_map(|attributes| attributes.values())
            .filter_map(|(kind, value)| {
                non_empty(value).map(|value| RecognizedAttribute::new(kind, value, confidence))
            })
            .collect();

        let recognition_type = if attributes.is_empty() {
            RecognitionType::Full
        } else {
            RecognitionType::Attribute
        };

        let page_info = DocumentPageInfo::from_file_name(&record.file_name).with_file_path(
            record
                .file_path
                .clone()
                .unwrap_or_else(|| record.file_name.clone()),
        );

        let mut builder = DocumentRecognitionResult::builder()
            .page_info(page_info)
            .recognition_type(recognition_type)
            .confidence(confidence);
        if let Some(code) = archive_code {
            builder = builder.archive_code(code);
        }
        if let Some(text) = non_empty(record.recognized_text.as_deref()) {
            builder = builder.full_text(text);
        }
        for attribute in attributes {
            builder = builder.attribute(attribute);
        }
        if let Some(processed_at) = record.processed_at {
            builder = builder.processing_date(processed_at);
        }

        builder.build().map_err(|e| {
            ReportError::Validation(format!("Intake record '{}': {e}", record.file_name))
        })
    }

    /// Convert a batch, stopping at the first invalid record
    pub fn adapt_all(&self, records: &[IntakeRecord]) -> Result<Vec<DocumentRecognitionResult>> {
        records.iter().map(|record| self.adapt(record)).collect()
    }
}
