//! Report templates and export configuration
//!
//! Templates are named field presets. A [`ReportConfiguration`] starts from a
//! template and may override its field selection; only the selected fields
//! affect the exported bytes.

use crate::domain::{DocumentRecognitionResult, RecognitionType, ReportError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fields that carry page information
const PAGE_INFO_FIELDS: [&str; 3] = ["fileName", "pageNumber", "imageNumber"];

/// Which recognition modes a template is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionFilter {
    /// Full-text documents only
    Full,
    /// Attribute documents only
    Attribute,
    /// Any document
    Both,
}

impl RecognitionFilter {
    /// True if documents of the given mode belong in the report
    pub fn matches(&self, recognition_type: RecognitionType) -> bool {
        match self {
            RecognitionFilter::Both => true,
            RecognitionFilter::Full => recognition_type == RecognitionType::Full,
            RecognitionFilter::Attribute => recognition_type == RecognitionType::Attribute,
        }
    }
}

impl fmt::Display for RecognitionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionFilter::Full => f.write_str("full"),
            RecognitionFilter::Attribute => f.write_str("attribute"),
            RecognitionFilter::Both => f.write_str("both"),
        }
    }
}

/// A built-in report preset
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTemplate {
    /// Template identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Display description
    pub description: &'static str,
    /// Field keys in column order
    pub fields: &'static [&'static str],
    /// Recognition modes the template targets
    pub recognition_type: RecognitionFilter,
}

const BUILTIN_TEMPLATES: [ReportTemplate; 5] = [
    ReportTemplate {
        id: "archiveFull",
        name: "Полный архивный отчёт",
        description: "Все архивные поля + атрибуты + информация о файле",
        fields: &[
            "archiveCode",
            "archiveId",
            "fund",
            "signature",
            "caseNumber",
            "fio",
            "date",
            "fileName",
            "pageNumber",
        ],
        recognition_type: RecognitionFilter::Both,
    },
    ReportTemplate {
        id: "archiveBasic",
        name: "Базовый архивный отчёт",
        description: "Только архивный шифр и основные атрибуты",
        fields: &["archiveCode", "fio", "date", "fileName"],
        recognition_type: RecognitionFilter::Both,
    },
    ReportTemplate {
        id: "fullText",
        name: "Сквозное распознавание",
        description: "Архивный шифр + полный текст + информация о файле",
        fields: &["archiveCode", "fullText", "fileName", "pageNumber"],
        recognition_type: RecognitionFilter::Full,
    },
    ReportTemplate {
        id: "attributeOnly",
        name: "Только атрибуты",
        description: "Архивный шифр + все атрибуты документа",
        fields: &[
            "archiveCode",
            "fio",
            "date",
            "address",
            "organization",
            "documentNumber",
        ],
        recognition_type: RecognitionFilter::Attribute,
    },
    ReportTemplate {
        id: "archiveStructure",
        name: "Структура архива",
        description: "Разбивка архивного шифра по компонентам",
        fields: &[
            "archiveId",
            "fund",
            "signature",
            "caseNumber",
            "fileName",
            "pageNumber",
        ],
        recognition_type: RecognitionFilter::Both,
    },
];

impl ReportTemplate {
    /// Default template identifier
    pub const DEFAULT_ID: &'static str = "archiveFull";

    /// All built-in templates
    pub fn builtin() -> &'static [ReportTemplate] {
        &BUILTIN_TEMPLATES
    }

    /// Looks up a built-in template by id
    pub fn find(id: &str) -> Option<&'static ReportTemplate> {
        BUILTIN_TEMPLATES.iter().find(|template| template.id == id)
    }

    /// True if the document's recognition mode suits this template
    pub fn accepts(&self, document: &DocumentRecognitionResult) -> bool {
        self.recognition_type.matches(document.recognition_type)
    }
}

/// Requested output format
///
/// Only CSV is produced; other values are accepted for compatibility and
/// exported as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// Excel workbook
    Xlsx,
    /// JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Xlsx => f.write_str("xlsx"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ReportError::Configuration(format!(
                "Invalid output format '{s}'. Must be one of: csv, xlsx, json"
            ))),
        }
    }
}

/// Export request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfiguration {
    /// Template the selection started from
    pub template: String,
    /// Field keys in column order
    pub selected_fields: Vec<String>,
    /// Requested output format
    pub output_format: OutputFormat,
    /// Whether page information columns are selected
    pub include_page_info: bool,
    /// Whether the caller should order documents by archive code and page
    pub group_by_archive: bool,
}

impl ReportConfiguration {
    /// Builds a configuration that selects every field of a template
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_report::core::templates::{ReportConfiguration, ReportTemplate};
    ///
    /// let template = ReportTemplate::find("archiveBasic").unwrap();
    /// let config = ReportConfiguration::from_template(template);
    /// assert_eq!(config.selected_fields, vec!["archiveCode", "fio", "date", "fileName"]);
    /// assert!(config.include_page_info);
    /// ```
    pub fn from_template(template: &ReportTemplate) -> Self {
        Self::with_fields(
            template.id,
            template.fields.iter().map(|key| key.to_string()).collect(),
        )
    }

    /// Builds a configuration with an explicit field selection
    pub fn with_fields(template: impl Into<String>, selected_fields: Vec<String>) -> Self {
        let include_page_info = selected_fields
            .iter()
            .any(|key| PAGE_INFO_FIELDS.contains(&key.as_str()));
        Self {
            template: template.into(),
            selected_fields,
            output_format: OutputFormat::Csv,
            include_page_info,
            group_by_archive: false,
        }
    }

    /// Sets the output format
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Sets the grouping flag
    pub fn with_group_by_archive(mut self, group_by_archive: bool) -> Self {
        self.group_by_archive = group_by_archive;
        self
    }
}

impl Default for ReportConfiguration {
    fn default() -> Self {
        BUILTIN_TEMPLATES
            .iter()
            .find(|template| template.id == ReportTemplate::DEFAULT_ID)
            .map(Self::from_template)
            .unwrap_or_else(|| Self::with_fields(ReportTemplate::DEFAULT_ID, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::FieldRegistry;
    use crate::domain::DocumentBuilder;
    use test_case::test_case;

    #[test]
    fn test_builtin_templates_use_known_fields() {
        let registry = FieldRegistry::global();
        for template in ReportTemplate::builtin() {
            assert!(
                registry.unknown_keys(template.fields).is_empty(),
                "{} has unknown fields",
                template.id
            );
        }
    }

    #[test]
    fn test_builtin_ids() {
        let ids: Vec<_> = ReportTemplate::builtin().iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![
                "archiveFull",
                "archiveBasic",
                "fullText",
                "attributeOnly",
                "archiveStructure"
            ]
        );
    }

    #[test]
    fn test_find() {
        assert_eq!(
            ReportTemplate::find("fullText").map(|t| t.recognition_type),
            Some(RecognitionFilter::Full)
        );
        assert!(ReportTemplate::find("custom").is_none());
    }

    #[test_case(RecognitionFilter::Both, RecognitionType::Full, true)]
    #[test_case(RecognitionFilter::Both, RecognitionType::Attribute, true)]
    #[test_case(RecognitionFilter::Full, RecognitionType::Full, true)]
    #[test_case(RecognitionFilter::Full, RecognitionType::Attribute, false)]
    #[test_case(RecognitionFilter::Attribute, RecognitionType::Attribute, true)]
    #[test_case(RecognitionFilter::Attribute, RecognitionType::Full, false)]
    fn test_recognition_filter(filter: RecognitionFilter, kind: RecognitionType, expected: bool) {
        assert_eq!(filter.matches(kind), expected);
    }

    #[test]
    fn test_accepts_document() {
        let document = DocumentBuilder::new()
            .file_name("01-0203-0745-000002_00000001.jpg")
            .recognition_type(RecognitionType::Full)
            .full_text("Текст")
            .build()
            .unwrap();

        assert!(ReportTemplate::find("fullText").unwrap().accepts(&document));
        assert!(!ReportTemplate::find("attributeOnly").unwrap().accepts(&document));
    }

    #[test]
    fn test_include_page_info_follows_selection() {
        let config = ReportConfiguration::from_template(ReportTemplate::find("attributeOnly").unwrap());
        assert!(!config.include_page_info);

        let config = ReportConfiguration::with_fields("custom", vec!["imageNumber".to_string()]);
        assert!(config.include_page_info);
    }

    #[test]
    fn test_default_configuration() {
        let config = ReportConfiguration::default();
        assert_eq!(config.template, "archiveFull");
        assert_eq!(config.selected_fields.len(), 9);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert!(!config.group_by_archive);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("xlsx".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
