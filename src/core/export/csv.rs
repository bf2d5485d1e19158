//! RFC 4180 CSV encoding for report rows

use crate::core::fields::{FieldContext, FieldRegistry};
use crate::domain::DocumentRecognitionResult;

/// Field separator
pub const SEPARATOR: char = ',';

/// Record terminator
pub const LINE_ENDING: &str = "\n";

/// Byte order mark that lets spreadsheet tools detect UTF-8
pub const UTF8_BOM: &str = "\u{FEFF}";

/// Quotes a value when it contains a separator, quote or line break
///
/// Embedded quotes are doubled. Values without special characters are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use archive_report::core::export::csv::escape_csv_value;
///
/// assert_eq!(escape_csv_value("Иванов"), "Иванов");
/// assert_eq!(escape_csv_value("Москва, ул. Ленина"), "\"Москва, ул. Ленина\"");
/// assert_eq!(escape_csv_value("ООО \"Рога\""), "\"ООО \"\"Рога\"\"\"");
/// ```
pub fn escape_csv_value(value: &str) -> String {
    if value.contains([SEPARATOR, '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Column headers for the selected fields
///
/// Unknown keys fall back to the key itself.
pub fn create_report_headers<S: AsRef<str>>(selected_fields: &[S]) -> Vec<String> {
    let registry = FieldRegistry::global();
    selected_fields
        .iter()
        .map(|key| escape_csv_value(registry.label(key.as_ref())))
        .collect()
}

/// One CSV record (without terminator) using the default date locale
pub fn create_report_row<S: AsRef<str>>(
    document: &DocumentRecognitionResult,
    selected_fields: &[S],
) -> String {
    create_report_row_with(document, selected_fields, &FieldContext::default())
}

/// One CSV record (without terminator) with explicit rendering options
pub fn create_report_row_with<S: AsRef<str>>(
    document: &DocumentRecognitionResult,
    selected_fields: &[S],
    context: &FieldContext,
) -> String {
    let registry = FieldRegistry::global();
    selected_fields
        .iter()
        .map(|key| escape_csv_value(&registry.value(document, key.as_ref(), context)))
        .collect::<Vec<_>>()
        .join(",")
}
