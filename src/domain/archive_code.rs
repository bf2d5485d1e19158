//! Archive code value object
//!
//! An archive code locates a physical document inside an archival holding:
//! archive, fund, inventory ("opis", called signature here) and case ("delo").
//! The canonical form is `AA-FFFF-SSSS-CCCCCC`, for example `01-0203-0745-000002`.
//!
//! Parsing is lenient in the sense that a missing or malformed code is a normal
//! outcome: [`parse_archive_code`] and [`extract_archive_code_from_path`] return
//! `None` rather than an error. Formatting from components is strict and names
//! the offending component.

use super::errors::ReportError;
use super::result::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const ARCHIVE_ID_DIGITS: usize = 2;
const FUND_DIGITS: usize = 4;
const SIGNATURE_DIGITS: usize = 4;
const CASE_NUMBER_DIGITS: usize = 6;

fn canonical_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{2})-([0-9]{4})-([0-9]{4})-([0-9]{6})$")
            .expect("canonical archive code pattern compiles")
    })
}

fn embedded_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[0-9]{2}-[0-9]{4}-[0-9]{4}-[0-9]{6}")
            .expect("embedded archive code pattern compiles")
    })
}

/// Canonical archive code
///
/// Only the full code is stored; the components are fixed-width ASCII slices
/// of it, so the full code and the components can never disagree.
///
/// # Examples
///
/// ```
/// use archive_report::domain::archive_code::ArchiveCode;
///
/// let code = ArchiveCode::parse(" 01-0203-0745-000002 ").unwrap();
/// assert_eq!(code.archive_id(), "01");
/// assert_eq!(code.fund(), "0203");
/// assert_eq!(code.signature(), "0745");
/// assert_eq!(code.case_number(), "000002");
/// assert_eq!(code.full_code(), "01-0203-0745-000002");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchiveCode(String);

impl ArchiveCode {
    /// Parses a canonical archive code, returning `None` for any other shape
    ///
    /// Surrounding whitespace is trimmed and the input is upper-cased before
    /// matching.
    pub fn parse(input: &str) -> Option<Self> {
        let clean = input.trim().to_uppercase();
        if clean.is_empty() || !canonical_pattern().is_match(&clean) {
            return None;
        }
        Some(Self(clean))
    }

    /// Builds a code from its components, validating each digit count
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidArchiveCodeComponent`] for the first
    /// component that fails its check.
    pub fn from_components(components: &ArchiveCodeComponents) -> Result<Self> {
        let full_code = format_archive_code(components)?;
        Ok(Self(full_code))
    }

    /// Two-digit archive number
    pub fn archive_id(&self) -> &str {
        &self.0[0..2]
    }

    /// Four-digit fund number
    pub fn fund(&self) -> &str {
        &self.0[3..7]
    }

    /// Four-digit inventory (opis) number
    pub fn signature(&self) -> &str {
        &self.0[8..12]
    }

    /// Six-digit case (delo) number
    pub fn case_number(&self) -> &str {
        &self.0[13..19]
    }

    /// Canonical `AA-FFFF-SSSS-CCCCCC` form
    pub fn full_code(&self) -> &str {
        &self.0
    }

    /// Returns the components as an owned record
    pub fn components(&self) -> ArchiveCodeComponents {
        ArchiveCodeComponents {
            archive_id: self.archive_id().to_string(),
            fund: self.fund().to_string(),
            signature: self.signature().to_string(),
            case_number: self.case_number().to_string(),
        }
    }

    /// Consumes self and returns the canonical string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ArchiveCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArchiveCode {
    type Err = ReportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ReportError::Validation(format!(
                "Invalid archive code '{s}'. Expected format: AA-FFFF-SSSS-CCCCCC"
            ))
        })
    }
}

impl AsRef<str> for ArchiveCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wire shape of an archive code
///
/// Upstream producers send either the canonical string or the component
/// object (`archiveId`, `fund`, `signature`, `caseNumber`, `fullCode`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ArchiveCodeRepr {
    Code(String),
    Parts {
        #[serde(flatten)]
        components: ArchiveCodeComponents,
        #[serde(rename = "fullCode", default)]
        full_code: Option<String>,
    },
}

impl Serialize for ArchiveCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ArchiveCodeRepr::Parts {
            components: self.components(),
            full_code: Some(self.0.clone()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ArchiveCode {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        use serde::de::Error;

        match ArchiveCodeRepr::deserialize(deserializer)? {
            ArchiveCodeRepr::Code(code) => code.parse().map_err(D::Error::custom),
            ArchiveCodeRepr::Parts {
                components,
                full_code,
            } => {
                let code = ArchiveCode::from_components(&components).map_err(D::Error::custom)?;
                if let Some(full_code) = full_code {
                    if full_code.trim().to_uppercase() != code.full_code() {
                        return Err(D::Error::custom(format!(
                            "fullCode '{full_code}' does not match components '{code}'"
                        )));
                    }
                }
                Ok(code)
            }
        }
    }
}

/// Archive code components as separate strings
///
/// This is the input to [`format_archive_code`]; values are checked, not
/// padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveCodeComponents {
    /// Archive number (2 digits)
    pub archive_id: String,
    /// Fund number (4 digits)
    pub fund: String,
    /// Inventory number (4 digits)
    pub signature: String,
    /// Case number (6 digits)
    pub case_number: String,
}

impl ArchiveCodeComponents {
    /// Creates a component record
    pub fn new(
        archive_id: impl Into<String>,
        fund: impl Into<String>,
        signature: impl Into<String>,
        case_number: impl Into<String>,
    ) -> Self {
        Self {
            archive_id: archive_id.into(),
            fund: fund.into(),
            signature: signature.into(),
            case_number: case_number.into(),
        }
    }
}

fn check_component(component: &'static str, value: &str, expected_digits: usize) -> Result<()> {
    if value.len() == expected_digits && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ReportError::InvalidArchiveCodeComponent {
            component,
            expected_digits,
            value: value.to_string(),
        })
    }
}

/// Parses an archive code from a string (see [`ArchiveCode::parse`])
pub fn parse_archive_code(input: &str) -> Option<ArchiveCode> {
    ArchiveCode::parse(input)
}

/// Joins validated components into the canonical string form
///
/// # Errors
///
/// Returns [`ReportError::InvalidArchiveCodeComponent`] naming the first
/// component whose digit count is wrong.
///
/// # Examples
///
/// ```
/// use archive_report::domain::archive_code::{format_archive_code, ArchiveCodeComponents};
///
/// let components = ArchiveCodeComponents::new("01", "0203", "0745", "000002");
/// assert_eq!(format_archive_code(&components).unwrap(), "01-0203-0745-000002");
///
/// let bad = ArchiveCodeComponents::new("1", "0203", "0745", "000002");
/// assert!(format_archive_code(&bad).is_err());
/// ```
pub fn format_archive_code(components: &ArchiveCodeComponents) -> Result<String> {
    check_component("archive_id", &components.archive_id, ARCHIVE_ID_DIGITS)?;
    check_component("fund", &components.fund, FUND_DIGITS)?;
    check_component("signature", &components.signature, SIGNATURE_DIGITS)?;
    check_component("case_number", &components.case_number, CASE_NUMBER_DIGITS)?;

    Ok(format!(
        "{}-{}-{}-{}",
        components.archive_id, components.fund, components.signature, components.case_number
    ))
}

/// Returns true if the input parses as a canonical archive code
pub fn validate_archive_code(input: &str) -> bool {
    parse_archive_code(input).is_some()
}

/// Finds the first archive code embedded anywhere in a file name or path
///
/// # Examples
///
/// ```
/// use archive_report::domain::archive_code::extract_archive_code_from_path;
///
/// let code = extract_archive_code_from_path("scans/01-0203-0745-000002_00000007.jpg").unwrap();
/// assert_eq!(code.case_number(), "000002");
/// assert!(extract_archive_code_from_path("scan_0001.jpg").is_none());
/// ```
pub fn extract_archive_code_from_path(file_name: &str) -> Option<ArchiveCode> {
    let found = embedded_pattern().find(file_name)?;
    parse_archive_code(found.as_str())
}
