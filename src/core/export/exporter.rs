//! Report exporter - renders documents into a CSV artifact
//!
//! The exporter is a pure transformation from documents and a configuration
//! to bytes plus metadata. Saving the artifact is left to a
//! [`ReportSink`](super::sink::ReportSink).

use crate::core::export::csv::{create_report_headers, create_report_row_with, LINE_ENDING, UTF8_BOM};
use crate::core::export::filename::{generate_file_name, Clock, SystemClock, DEFAULT_BASE_NAME};
use crate::core::export::summary::{ExportResult, CSV_MIME_TYPE};
use crate::core::fields::{DateLocale, FieldContext};
use crate::core::templates::{OutputFormat, ReportConfiguration};
use crate::domain::{DocumentRecognitionResult, ReportError, Result};
use std::time::Instant;

/// Progress is logged after this many rows
const PROGRESS_INTERVAL: usize = 100;

/// A rendered report ready to be saved
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    /// Generated file name
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: &'static str,
    /// BOM-prefixed CSV text
    pub content: String,
    /// Export metadata
    pub result: ExportResult,
}

impl ReportArtifact {
    /// Encoded bytes, starting with the UTF-8 BOM
    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// CSV text without the BOM
    pub fn csv(&self) -> &str {
        self.content.strip_prefix(UTF8_BOM).unwrap_or(&self.content)
    }
}

/// Rendering options that do not come from the report configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// File name prefix
    pub base_name: String,
    /// Locale for the processing date column
    pub date_locale: DateLocale,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_name: DEFAULT_BASE_NAME.to_string(),
            date_locale: DateLocale::default(),
        }
    }
}

/// CSV report exporter
pub struct ReportExporter<C: Clock = SystemClock> {
    clock: C,
    options: ExportOptions,
}

impl ReportExporter<SystemClock> {
    /// Create an exporter using the wall clock and default options
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            options: ExportOptions::default(),
        }
    }
}

impl Default for ReportExporter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ReportExporter<C> {
    /// Replace the clock
    pub fn with_clock<D: Clock>(self, clock: D) -> ReportExporter<D> {
        ReportExporter {
            clock,
            options: self.options,
        }
    }

    /// Replace the rendering options
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Render documents into a CSV artifact
    ///
    /// Rows follow the input order. Every record, the last included, ends with
    /// `\n`, and the text is prefixed with a UTF-8 BOM.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EmptyInput`] when `documents` is empty and
    /// [`ReportError::NoFieldsSelected`] when the configuration selects no
    /// fields. Nothing is produced in either case.
    pub fn export(
        &self,
        documents: &[DocumentRecognitionResult],
        config: &ReportConfiguration,
    ) -> Result<ReportArtifact> {
        if documents.is_empty() {
            return Err(ReportError::EmptyInput);
        }
        if config.selected_fields.is_empty() {
            return Err(ReportError::NoFieldsSelected);
        }

        let start_time = Instant::now();
        let total = documents.len();
        let fields = &config.selected_fields;

        crate::log_export_start!(config.template, total, fields.len());

        if config.output_format != OutputFormat::Csv {
            tracing::warn!(
                requested = %config.output_format,
                "Only CSV output is supported, exporting as CSV"
            );
        }

        let context = FieldContext {
            date_locale: self.options.date_locale,
        };

        let mut content = String::from(UTF8_BOM);
        content.push_str(&create_report_headers(fields).join(","));
        content.push_str(LINE_ENDING);

        for (index, document) in documents.iter().enumerate() {
            content.push_str(&create_report_row_with(document, fields, &context));
            content.push_str(LINE_ENDING);

            let processed = index + 1;
            if processed % PROGRESS_INTERVAL == 0 {
                crate::log_batch_processing!(processed, total);
            }
        }

        let export_date = self.clock.now();
        let file_name = generate_file_name(&self.options.base_name, export_date);
        let result = ExportResult::new(
            file_name.clone(),
            total,
            fields.len(),
            content.len(),
            export_date,
        )
        .with_duration(start_time.elapsed());

        crate::log_export_complete!(total, result.duration);

        Ok(ReportArtifact {
            file_name,
            mime_type: CSV_MIME_TYPE,
            content,
            result,
        })
    }
}

/// Render documents with the wall clock and default options
///
/// # Examples
///
/// ```
/// use archive_report::core::export::export_report_to_csv;
/// use archive_report::core::templates::ReportConfiguration;
/// use archive_report::domain::{
///     AttributeKind, DocumentRecognitionResult, RecognitionType, RecognizedAttribute,
/// };
///
/// let document = DocumentRecognitionResult::builder()
///     .file_name("01-0203-0745-000002_00000001.jpg")
///     .recognition_type(RecognitionType::Attribute)
///     .attribute(RecognizedAttribute::new(AttributeKind::Fio, "Иванов И.И.", 0.95))
///     .build()
///     .unwrap();
/// let config = ReportConfiguration::with_fields(
///     "custom",
///     vec!["archiveCode".to_string(), "fio".to_string()],
/// );
///
/// let artifact = export_report_to_csv(&[document], &config).unwrap();
/// assert_eq!(artifact.csv(), "Архивный шифр,ФИО\n01-0203-0745-000002,Иванов И.И.\n");
/// assert_eq!(artifact.result.records_count, 1);
/// ```
pub fn export_report_to_csv(
    documents: &[DocumentRecognitionResult],
    config: &ReportConfiguration,
) -> Result<ReportArtifact> {
    ReportExporter::new().export(documents, config)
}
