//! Domain models and types for archive-report.
//!
//! This module contains the archive code value object, page and document
//! records, and the error hierarchy.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Archive codes** ([`ArchiveCode`], [`ArchiveReference`]) with strict and
//!   loose parsing
//! - **Document records** ([`DocumentRecognitionResult`], [`DocumentPageInfo`],
//!   [`RecognizedAttribute`])
//! - **Error types** ([`ReportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Absent codes are not errors
//!
//! A file name without an archive code is an ordinary case, so parsing returns
//! `Option`:
//!
//! ```rust
//! use archive_report::domain::{extract_archive_code_from_path, parse_archive_code};
//!
//! assert!(parse_archive_code("1-0203-0745-000002").is_none());
//! let code = extract_archive_code_from_path("scans/01-0203-0745-000002_00000007.jpg");
//! assert_eq!(code.unwrap().fund(), "0203");
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, ReportError>`]:
//!
//! ```rust
//! use archive_report::domain::{format_archive_code, ArchiveCodeComponents, ReportError};
//!
//! let components = ArchiveCodeComponents::new("01", "203", "0745", "000002");
//! match format_archive_code(&components) {
//!     Err(ReportError::InvalidArchiveCodeComponent { component, .. }) => {
//!         assert_eq!(component, "fund");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub mod archive_code;
pub mod document;
pub mod errors;
pub mod page;
pub mod reference;
pub mod result;

// Re-export commonly used types for convenience
pub use archive_code::{
    extract_archive_code_from_path, format_archive_code, parse_archive_code,
    validate_archive_code, ArchiveCode, ArchiveCodeComponents,
};
pub use document::{
    AttributeKind, DocumentBuilder, DocumentRecognitionResult, RecognitionType,
    RecognizedAttribute, TextPosition,
};
pub use errors::ReportError;
pub use page::{create_document_page_info, extract_image_number, DocumentPageInfo};
pub use reference::ArchiveReference;
pub use result::Result;
