//! Recognized document model
//!
//! [`DocumentRecognitionResult`] is the one canonical record the export
//! pipeline reads. Upstream shapes are converted into it by the adapters in
//! [`crate::adapters`].

use super::archive_code::ArchiveCode;
use super::page::DocumentPageInfo;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an extracted attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKind {
    /// Person name (surname, given name, patronymic)
    Fio,
    /// Document date
    Date,
    /// Address of the event
    Address,
    /// Organization name
    Organization,
    /// Document number or code
    DocumentNumber,
    /// Archive code found in the text
    ArchiveCode,
}

impl AttributeKind {
    /// All attribute kinds in display order
    pub const ALL: [AttributeKind; 6] = [
        AttributeKind::Fio,
        AttributeKind::Date,
        AttributeKind::Address,
        AttributeKind::Organization,
        AttributeKind::DocumentNumber,
        AttributeKind::ArchiveCode,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Fio => "fio",
            AttributeKind::Date => "date",
            AttributeKind::Address => "address",
            AttributeKind::Organization => "organization",
            AttributeKind::DocumentNumber => "documentNumber",
            AttributeKind::ArchiveCode => "archiveCode",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character offsets of an attribute in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPosition {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

/// One extracted attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedAttribute {
    /// Attribute kind
    #[serde(rename = "type")]
    pub kind: AttributeKind,

    /// Extracted value
    pub value: String,

    /// Recognition confidence in [0, 1]
    pub confidence: f64,

    /// Position in the source text, used for highlighting only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TextPosition>,
}

impl RecognizedAttribute {
    /// Creates an attribute without a position
    pub fn new(kind: AttributeKind, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind,
            value: value.into(),
            confidence,
            position: None,
        }
    }

    /// Sets the source position
    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some(TextPosition { start, end });
        self
    }
}

/// Recognition mode of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionType {
    /// Full-text recognition, `full_text` is populated
    Full,
    /// Attribute extraction, `attributes` is populated
    Attribute,
}

impl fmt::Display for RecognitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionType::Full => f.write_str("full"),
            RecognitionType::Attribute => f.write_str("attribute"),
        }
    }
}

/// Recognition output for a single page, the unit of export
///
/// # Examples
///
/// ```
/// use archive_report::domain::document::{
///     AttributeKind, DocumentRecognitionResult, RecognitionType, RecognizedAttribute,
/// };
///
/// let document = DocumentRecognitionResult::builder()
///     .file_name("01-0203-0745-000002_00000001.jpg")
///     .recognition_type(RecognitionType::Attribute)
///     .attribute(RecognizedAttribute::new(AttributeKind::Fio, "Иванов И.И.", 0.95))
///     .confidence(0.95)
///     .build()
///     .unwrap();
///
/// assert_eq!(document.archive_code.unwrap().full_code(), "01-0203-0745-000002");
/// assert_eq!(document.page_info.page_number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecognitionResult {
    /// Archive code of the case this page belongs to
    #[serde(default)]
    pub archive_code: Option<ArchiveCode>,

    /// Page information
    pub page_info: DocumentPageInfo,

    /// Recognition mode
    pub recognition_type: RecognitionType,

    /// Full recognized text (full-text mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,

    /// Extracted attributes in extraction order (attribute mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<RecognizedAttribute>>,

    /// When the page was processed, in the operator's local offset
    #[serde(default)]
    pub processing_date: Option<DateTime<FixedOffset>>,

    /// Aggregate confidence in [0, 1]
    #[serde(default)]
    pub confidence: f64,
}

impl DocumentRecognitionResult {
    /// Creates a new builder
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// First attribute of the given kind, in extraction order
    pub fn first_attribute(&self, kind: AttributeKind) -> Option<&RecognizedAttribute> {
        self.attributes
            .as_deref()
            .and_then(|attributes| attributes.iter().find(|a| a.kind == kind))
    }

    /// Checks confidence bounds on the record and its attributes
    ///
    /// # Errors
    ///
    /// Returns a description of the first out-of-range value.
    pub fn validate(&self) -> Result<(), String> {
        check_confidence("confidence", self.confidence)?;
        for attribute in self.attributes.iter().flatten() {
            check_confidence(attribute.kind.as_str(), attribute.confidence)?;
        }
        Ok(())
    }
}

fn check_confidence(name: &str, value: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{name} confidence must be between 0 and 1, got {value}"
        ))
    }
}

/// Builder for constructing [`DocumentRecognitionResult`] instances
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    archive_code: Option<ArchiveCode>,
    page_info: Option<DocumentPageInfo>,
    recognition_type: Option<RecognitionType>,
    full_text: Option<String>,
    attributes: Option<Vec<RecognizedAttribute>>,
    processing_date: Option<DateTime<FixedOffset>>,
    confidence: f64,
}

impl DocumentBuilder {
    /// Creates a new DocumentBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive code
    pub fn archive_code(mut self, archive_code: ArchiveCode) -> Self {
        self.archive_code = Some(archive_code);
        self
    }

    /// Sets page info
    pub fn page_info(mut self, page_info: DocumentPageInfo) -> Self {
        self.page_info = Some(page_info);
        self
    }

    /// Derives page info from a file name
    ///
    /// The archive code is also taken from the file name unless one was set
    /// explicitly.
    pub fn file_name(mut self, file_name: &str) -> Self {
        if self.archive_code.is_none() {
            self.archive_code =
                super::archive_code::extract_archive_code_from_path(file_name);
        }
        self.page_info = Some(super::page::create_document_page_info(
            file_name,
            self.archive_code.as_ref(),
        ));
        self
    }

    /// Sets the recognition mode
    pub fn recognition_type(mut self, recognition_type: RecognitionType) -> Self {
        self.recognition_type = Some(recognition_type);
        self
    }

    /// Sets the full recognized text
    pub fn full_text(mut self, full_text: impl Into<String>) -> Self {
        self.full_text = Some(full_text.into());
        self
    }

    /// Appends an attribute
    pub fn attribute(mut self, attribute: RecognizedAttribute) -> Self {
        self.attributes.get_or_insert_with(Vec::new).push(attribute);
        self
    }

    /// Sets the processing timestamp
    pub fn processing_date(mut self, processing_date: DateTime<FixedOffset>) -> Self {
        self.processing_date = Some(processing_date);
        self
    }

    /// Sets the aggregate confidence
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Builds the document
    ///
    /// # Errors
    ///
    /// Returns an error if page info or the recognition type is missing, or a
    /// confidence value is out of range.
    pub fn build(self) -> Result<DocumentRecognitionResult, String> {
        let document = DocumentRecognitionResult {
            archive_code: self.archive_code,
            page_info: self.page_info.ok_or("page_info is required")?,
            recognition_type: self.recognition_type.ok_or("recognition_type is required")?,
            full_text: self.full_text,
            attributes: self.attributes,
            processing_date: self.processing_date,
            confidence: self.confidence,
        };
        document.validate()?;
        Ok(document)
    }
}
