//! Document sources
//!
//! A [`DocumentSource`] yields canonical documents regardless of the shape the
//! upstream producer wrote.

use super::intake::{IntakeAdapter, IntakeRecord};
use crate::domain::{DocumentRecognitionResult, ReportError, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Shape of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// JSON array of canonical documents
    #[default]
    Canonical,
    /// JSON array of upload-stage intake records
    Intake,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Canonical => f.write_str("canonical"),
            InputKind::Intake => f.write_str("intake"),
        }
    }
}

impl FromStr for InputKind {
    type Err = ReportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canonical" => Ok(InputKind::Canonical),
            "intake" => Ok(InputKind::Intake),
            _ => Err(ReportError::Configuration(format!(
                "Invalid input kind '{s}'. Must be 'canonical' or 'intake'"
            ))),
        }
    }
}

/// Producer of canonical documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Load all documents
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or does not parse.
    async fn load(&self) -> Result<Vec<DocumentRecognitionResult>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// JSON file holding an array of documents or intake records
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    kind: InputKind,
    adapter: IntakeAdapter,
}

impl JsonFileSource {
    /// Create a source for a file
    pub fn new(path: impl Into<PathBuf>, kind: InputKind) -> Self {
        Self {
            path: path.into(),
            kind,
            adapter: IntakeAdapter::default(),
        }
    }

    /// Set the adapter used for intake records
    pub fn with_adapter(mut self, adapter: IntakeAdapter) -> Self {
        self.adapter = adapter;
        self
    }

    /// Input path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse JSON text according to this source's input kind
    pub fn parse(&self, content: &str) -> Result<Vec<DocumentRecognitionResult>> {
        match self.kind {
            InputKind::Canonical => {
                let documents: Vec<DocumentRecognitionResult> = serde_json::from_str(content)?;
                for document in &documents {
                    document.validate().map_err(|e| {
                        ReportError::Validation(format!(
                            "Document '{}': {e}",
                            document.page_info.file_name
                        ))
                    })?;
                }
                Ok(documents)
            }
            InputKind::Intake => {
                let records: Vec<IntakeRecord> = serde_json::from_str(content)?;
                self.adapter.adapt_all(&records)
            }
        }
    }
}

#[async_trait]
impl DocumentSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<DocumentRecognitionResult>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ReportError::Io(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let documents = self.parse(&content)?;

        tracing::info!(
            path = %self.path.display(),
            kind = %self.kind,
            documents = documents.len(),
            "Loaded documents"
        );
        Ok(documents)
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.path.display(), self.kind)
    }
}

/// Load canonical documents from a JSON file
pub async fn load_documents(path: impl AsRef<Path>) -> Result<Vec<DocumentRecognitionResult>> {
    JsonFileSource::new(path.as_ref(), InputKind::Canonical)
        .load()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CANONICAL: &str = r#"[
        {
            "archiveCode": "01-0203-0745-000002",
            "pageInfo": {
                "fileName": "01-0203-0745-000002_00000001.jpg",
                "pageNumber": 1,
                "filePath": "01-0203-0745-000002_00000001.jpg",
                "imageNumber": "00000001"
            },
            "recognitionType": "full",
            "fullText": "Текст",
            "confidence": 0.9
        }
    ]"#;

    const INTAKE: &str = r#"[
        { "fileName": "02-0105-1234-000001_00000003.jpg", "recognizedText": "Справка" },
        { "fileName": "cover.jpg", "extractedAttributes": { "fio": "Иванов" } }
    ]"#;

    #[test]
    fn test_input_kind_from_str() {
        assert_eq!("Intake".parse::<InputKind>().unwrap(), InputKind::Intake);
        assert_eq!("canonical".parse::<InputKind>().unwrap(), InputKind::Canonical);
        assert!("xml".parse::<InputKind>().is_err());
    }

    #[tokio::test]
    async fn test_load_canonical() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CANONICAL.as_bytes()).unwrap();

        let documents = load_documents(file.path()).await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].full_text.as_deref(), Some("Текст"));
    }

    #[tokio::test]
    async fn test_load_intake() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(INTAKE.as_bytes()).unwrap();

        let documents = JsonFileSource::new(file.path(), InputKind::Intake)
            .load()
            .await
            .unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].page_info.page_number, 3);
        assert!(documents[1].archive_code.is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_documents("/nonexistent/documents.json").await;
        assert!(matches!(result, Err(ReportError::Io(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range_confidence() {
        let content = CANONICAL.replace("0.9", "1.9");
        let source = JsonFileSource::new("unused.json", InputKind::Canonical);
        assert!(matches!(
            source.parse(&content),
            Err(ReportError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_malformed_json() {
        let source = JsonFileSource::new("unused.json", InputKind::Intake);
        assert!(matches!(
            source.parse("{not json"),
            Err(ReportError::Serialization(_))
        ));
    }
}
