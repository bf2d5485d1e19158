//! Report field registry
//!
//! The set of exportable fields is closed. Each field key maps to a
//! descriptor holding its label, category and a pure extraction function. The
//! registry is built once and shared.
//!
//! # Examples
//!
//! ```
//! use archive_report::core::fields::{get_field_value, FieldRegistry};
//! use archive_report::domain::{DocumentRecognitionResult, RecognitionType};
//!
//! let document = DocumentRecognitionResult::builder()
//!     .file_name("01-0203-0745-000002_00000007.jpg")
//!     .recognition_type(RecognitionType::Full)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(get_field_value(&document, "caseNumber"), "000002");
//! assert_eq!(get_field_value(&document, "pageNumber"), "7");
//! assert_eq!(get_field_value(&document, "noSuchField"), "");
//! assert_eq!(FieldRegistry::global().label("fio"), "ФИО");
//! ```

use crate::domain::{AttributeKind, DocumentRecognitionResult, ReportError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// UI grouping of a field; has no effect on export output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    /// Archive code and its components
    Archive,
    /// Full recognized text
    Text,
    /// Extracted attributes
    Attributes,
    /// Scan file information
    File,
}

impl FieldCategory {
    /// Human-readable category label
    pub fn label(&self) -> &'static str {
        match self {
            FieldCategory::Archive => "Архивные данные",
            FieldCategory::Text => "Текст документа",
            FieldCategory::Attributes => "Атрибуты документа",
            FieldCategory::File => "Информация о файле",
        }
    }
}

/// Date and time rendering for the processing date column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateLocale {
    /// `15.03.2024, 14:05:09`
    #[default]
    #[serde(rename = "ru-RU")]
    RuRu,
    /// `3/15/2024, 2:05:09 PM`
    #[serde(rename = "en-US")]
    EnUs,
    /// `2024-03-15 14:05:09`
    #[serde(rename = "iso")]
    Iso,
}

impl DateLocale {
    /// chrono format string for this locale
    pub fn pattern(&self) -> &'static str {
        match self {
            DateLocale::RuRu => "%d.%m.%Y, %H:%M:%S",
            DateLocale::EnUs => "%-m/%-d/%Y, %-I:%M:%S %p",
            DateLocale::Iso => "%Y-%m-%d %H:%M:%S",
        }
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLocale::RuRu => f.write_str("ru-RU"),
            DateLocale::EnUs => f.write_str("en-US"),
            DateLocale::Iso => f.write_str("iso"),
        }
    }
}

impl FromStr for DateLocale {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru-ru" | "ru" => Ok(DateLocale::RuRu),
            "en-us" | "en" => Ok(DateLocale::EnUs),
            "iso" => Ok(DateLocale::Iso),
            _ => Err(ReportError::Configuration(format!(
                "Invalid date locale '{s}'. Must be one of: ru-RU, en-US, iso"
            ))),
        }
    }
}

/// Rendering options shared by all extractors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldContext {
    /// Locale for the processing date
    pub date_locale: DateLocale,
}

type Extractor = fn(&DocumentRecognitionResult, &FieldContext) -> String;

/// Static metadata for one report column
#[derive(Debug, Clone, Serialize)]
pub struct ReportField {
    /// Stable lookup key
    pub key: &'static str,
    /// Column header
    pub label: &'static str,
    /// Description shown in field pickers
    pub description: &'static str,
    /// UI grouping
    pub category: FieldCategory,
    /// Informational only; not enforced by the exporter
    pub required: bool,
    #[serde(skip)]
    extract: Extractor,
}

impl ReportField {
    /// Extracts this field's value from a document
    pub fn value(&self, document: &DocumentRecognitionResult, context: &FieldContext) -> String {
        (self.extract)(document, context)
    }
}

fn attribute_value(document: &DocumentRecognitionResult, kind: AttributeKind) -> String {
    document
        .first_attribute(kind)
        .map(|attribute| attribute.value.clone())
        .unwrap_or_default()
}

fn archive_value(
    document: &DocumentRecognitionResult,
    component: impl Fn(&crate::domain::ArchiveCode) -> &str,
) -> String {
    document
        .archive_code
        .as_ref()
        .map(|code| component(code).to_string())
        .unwrap_or_default()
}

macro_rules! field {
    ($key:literal, $label:literal, $description:literal, $category:ident, $extract:expr) => {
        ReportField {
            key: $key,
            label: $label,
            description: $description,
            category: FieldCategory::$category,
            required: false,
            extract: $extract,
        }
    };
}

fn builtin_fields() -> Vec<ReportField> {
    vec![
        ReportField {
            required: true,
            ..field!(
                "archiveCode",
                "Архивный шифр",
                "Полный архивный шифр документа (01-0203-0745-000002)",
                Archive,
                |d, _| archive_value(d, |c| c.full_code())
            )
        },
        field!("archiveId", "Номер архива", "Номер архива (01)", Archive, |d, _| {
            archive_value(d, |c| c.archive_id())
        }),
        field!("fund", "Фонд", "Номер фонда (0203)", Archive, |d, _| {
            archive_value(d, |c| c.fund())
        }),
        field!("signature", "Подпись", "Номер подписи (0745)", Archive, |d, _| {
            archive_value(d, |c| c.signature())
        }),
        field!("caseNumber", "Дело", "Номер дела (000002)", Archive, |d, _| {
            archive_value(d, |c| c.case_number())
        }),
        field!(
            "fullText",
            "Полный текст документа",
            "Весь распознанный текст документа (для сквозного распознавания)",
            Text,
            |d, _| d.full_text.clone().unwrap_or_default()
        ),
        field!("fio", "ФИО", "Фамилия, имя, отчество", Attributes, |d, _| {
            attribute_value(d, AttributeKind::Fio)
        }),
        field!("date", "Дата", "Дата документа", Attributes, |d, _| {
            attribute_value(d, AttributeKind::Date)
        }),
        field!("address", "Адрес", "Адрес места события", Attributes, |d, _| {
            attribute_value(d, AttributeKind::Address)
        }),
        field!(
            "organization",
            "Организация",
            "Название организации",
            Attributes,
            |d, _| attribute_value(d, AttributeKind::Organization)
        ),
        field!(
            "documentNumber",
            "Номер документа",
            "Номер или код документа",
            Attributes,
            |d, _| attribute_value(d, AttributeKind::DocumentNumber)
        ),
        field!("fileName", "Имя файла", "Название файла страницы", File, |d, _| {
            d.page_info.file_name.clone()
        }),
        field!("pageNumber", "Номер страницы", "Номер страницы в деле", File, |d, _| {
            d.page_info.page_number.to_string()
        }),
        field!("imageNumber", "Номер образа", "8-значный номер образа", File, |d, _| {
            d.page_info.image_number.clone()
        }),
        field!(
            "processingDate",
            "Дата обработки",
            "Дата и время обработки",
            File,
            |d, ctx| d
                .processing_date
                .map(|date| date.format(ctx.date_locale.pattern()).to_string())
                .unwrap_or_default()
        ),
    ]
}

/// Registry of all known report fields
pub struct FieldRegistry {
    fields: Vec<ReportField>,
    index: HashMap<&'static str, usize>,
}

impl FieldRegistry {
    fn new(fields: Vec<ReportField>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(position, field)| (field.key, position))
            .collect();
        Self { fields, index }
    }

    /// The shared registry, built on first use
    pub fn global() -> &'static FieldRegistry {
        static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| FieldRegistry::new(builtin_fields()))
    }

    /// Looks up a field by key
    pub fn get(&self, key: &str) -> Option<&ReportField> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    /// True if the key names a registered field
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All fields in registration order
    pub fn fields(&self) -> &[ReportField] {
        &self.fields
    }

    /// All keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.key)
    }

    /// Column label for a key, falling back to the key itself
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        match self.get(key) {
            Some(field) => field.label,
            None => key,
        }
    }

    /// Extracts a value, returning an empty string for unknown keys
    pub fn value(
        &self,
        document: &DocumentRecognitionResult,
        key: &str,
        context: &FieldContext,
    ) -> String {
        self.get(key)
            .map(|field| field.value(document, context))
            .unwrap_or_default()
    }

    /// Keys from `keys` that are not registered
    pub fn unknown_keys<'a, S: AsRef<str>>(&self, keys: &'a [S]) -> Vec<&'a str> {
        keys.iter()
            .map(AsRef::as_ref)
            .filter(|key| !self.contains(key))
            .collect()
    }
}

/// Extracts one cell value using the default (ru-RU) date locale
pub fn get_field_value(document: &DocumentRecognitionResult, field_key: &str) -> String {
    FieldRegistry::global().value(document, field_key, &FieldContext::default())
}
