//! Page information derived from scan file names
//!
//! Scans are named after their archive code and an 8-digit image number,
//! e.g. `01-0203-0745-000002_00000007.jpg` is image 7 of case `000002`.

use super::archive_code::ArchiveCode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn image_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]{8}").expect("image number pattern compiles"))
}

/// Page-level information about a scanned document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPageInfo {
    /// File name of the page scan
    pub file_name: String,

    /// Page number within the case, 0 when the file name has no image number
    pub page_number: u32,

    /// Path to the scan
    pub file_path: String,

    /// Raw 8-digit image number, empty when absent
    pub image_number: String,
}

/// Returns the first run of 8 consecutive digits, or an empty string
///
/// # Examples
///
/// ```
/// use archive_report::domain::page::extract_image_number;
///
/// assert_eq!(extract_image_number("01-0203-0745-000002_00000007.jpg"), "00000007");
/// assert_eq!(extract_image_number("scan.jpg"), "");
/// ```
pub fn extract_image_number(file_name: &str) -> String {
    image_number_pattern()
        .find(file_name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Builds page info for a file name
///
/// The archive code is accepted for correlation with the page but does not
/// influence the result.
pub fn create_document_page_info(
    file_name: &str,
    _archive_code: Option<&ArchiveCode>,
) -> DocumentPageInfo {
    let image_number = extract_image_number(file_name);
    // Eight decimal digits always fit in u32
    let page_number = image_number.parse().unwrap_or(0);

    DocumentPageInfo {
        file_name: file_name.to_string(),
        page_number,
        file_path: file_name.to_string(),
        image_number,
    }
}

impl DocumentPageInfo {
    /// Builds page info for a file name (see [`create_document_page_info`])
    pub fn from_file_name(file_name: &str) -> Self {
        create_document_page_info(file_name, None)
    }

    /// Replaces the file path, keeping the name-derived fields
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }
}
