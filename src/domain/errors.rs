//! Domain error types
//!
//! This module defines the error hierarchy for archive-report.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main archive-report error type
///
/// Every variant describes a caller-recoverable failure of a single operation.
/// Parsing functions never produce these for malformed input; they return
/// `None` instead.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No documents were supplied for export
    #[error("No document data to export")]
    EmptyInput,

    /// The field selection is empty
    #[error("No fields selected for export")]
    NoFieldsSelected,

    /// An archive code component failed its fixed digit-count check
    #[error("Invalid archive code component '{component}': expected {expected_digits} digits, got '{value}'")]
    InvalidArchiveCodeComponent {
        /// Name of the offending component (archive_id, fund, signature, case_number)
        component: &'static str,
        /// Required number of digits
        expected_digits: usize,
        /// Value that was rejected
        value: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors for domain records
    #[error("Validation error: {0}")]
    Validation(String),

    /// Report sink errors (saving the rendered report)
    #[error("Report sink error: {0}")]
    Sink(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ReportError {
    /// Returns true for the export preconditions (no data, no fields)
    ///
    /// Callers use this to tell a user which selection to correct before
    /// retrying the whole export.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ReportError::EmptyInput | ReportError::NoFieldsSelected)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_display() {
        let err = ReportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_precondition_messages_are_distinct() {
        assert_eq!(
            ReportError::EmptyInput.to_string(),
            "No document data to export"
        );
        assert_eq!(
            ReportError::NoFieldsSelected.to_string(),
            "No fields selected for export"
        );
        assert!(ReportError::EmptyInput.is_precondition());
        assert!(ReportError::NoFieldsSelected.is_precondition());
        assert!(!ReportError::Io("disk".to_string()).is_precondition());
    }

    #[test]
    fn test_invalid_component_names_component() {
        let err = ReportError::InvalidArchiveCodeComponent {
            component: "fund",
            expected_digits: 4,
            value: "203".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fund"));
        assert!(message.contains("4 digits"));
        assert!(message.contains("'203'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ReportError = io_err.into();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ReportError = json_err.into();
        assert!(matches!(err, ReportError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ReportError = toml_err.into();
        assert!(matches!(err, ReportError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_report_error_implements_std_error() {
        let err = ReportError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
