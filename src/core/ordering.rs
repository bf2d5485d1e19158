//! Grouping and ordering of documents by archive code
//!
//! The exporter keeps input order. Callers that want a report grouped by case
//! sort the documents with [`sort_documents_by_archive_and_page`] first.

use crate::domain::DocumentRecognitionResult;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Group key for documents without an archive code
pub const UNKNOWN_ARCHIVE_KEY: &str = "unknown";

/// Groups documents by full archive code, keeping input order within a group
///
/// # Examples
///
/// ```
/// use archive_report::core::ordering::group_documents_by_archive_code;
/// use archive_report::domain::{DocumentRecognitionResult, RecognitionType};
///
/// let docs: Vec<_> = ["01-0203-0745-000002_00000001.jpg", "cover.jpg"]
///     .iter()
///     .map(|name| {
///         DocumentRecognitionResult::builder()
///             .file_name(name)
///             .recognition_type(RecognitionType::Full)
///             .build()
///             .unwrap()
///     })
///     .collect();
///
/// let groups = group_documents_by_archive_code(&docs);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups["unknown"].len(), 1);
/// ```
pub fn group_documents_by_archive_code(
    documents: &[DocumentRecognitionResult],
) -> BTreeMap<String, Vec<&DocumentRecognitionResult>> {
    let mut groups: BTreeMap<String, Vec<&DocumentRecognitionResult>> = BTreeMap::new();
    for document in documents {
        let key = document
            .archive_code
            .as_ref()
            .map(|code| code.full_code())
            .unwrap_or(UNKNOWN_ARCHIVE_KEY);
        groups.entry(key.to_string()).or_default().push(document);
    }
    groups
}

/// Compares two documents by full archive code, then page number
///
/// Documents without a code sort after all coded documents.
pub fn compare_by_archive_and_page(
    a: &DocumentRecognitionResult,
    b: &DocumentRecognitionResult,
) -> Ordering {
    let code_a = a.archive_code.as_ref().map(|code| code.full_code());
    let code_b = b.archive_code.as_ref().map(|code| code.full_code());

    let by_code = match (code_a, code_b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_code.then_with(|| a.page_info.page_number.cmp(&b.page_info.page_number))
}

/// Sorts documents in place by archive code and page; ties keep input order
pub fn sort_documents_by_archive_and_page(documents: &mut [DocumentRecognitionResult]) {
    documents.sort_by(compare_by_archive_and_page);
}
