//! Loose archive references
//!
//! Older intake records carry free-text references instead of canonical codes:
//!
//! - `"Фонд 10, опись 5, дело 20"`
//! - `"Ф.5, Оп.1, Д.12"`
//! - `"01-0203-0745-000002"` (canonical form, also accepted here)
//!
//! [`ArchiveReference::parse`] extracts whatever numbers it can find. A
//! reference converts to an [`ArchiveCode`] only when every component is known
//! and fits its width.

use super::archive_code::{ArchiveCode, ArchiveCodeComponents};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

struct LegacyPatterns {
    fund: Regex,
    inventory: Regex,
    case_number: Regex,
}

fn legacy_patterns() -> &'static LegacyPatterns {
    static PATTERNS: OnceLock<LegacyPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| LegacyPatterns {
        fund: Regex::new(r"(?i)\bфонд[\s:]*([0-9]+)|\bф\.?\s*([0-9]+)")
            .expect("fund pattern compiles"),
        inventory: Regex::new(r"(?i)\bопись[\s:]*([0-9]+)|\bоп\.?\s*([0-9]+)")
            .expect("inventory pattern compiles"),
        case_number: Regex::new(r"(?i)\bдело\s*№?\s*([0-9]+)|\bд\.?\s*№?\s*([0-9]+)")
            .expect("case pattern compiles"),
    })
}

fn first_number(pattern: &Regex, input: &str) -> Option<u32> {
    let captures = pattern.captures(input)?;
    captures
        .iter()
        .skip(1)
        .flatten()
        .next()
        .and_then(|m| m.as_str().parse().ok())
}

/// Numeric archive reference with optional components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveReference {
    /// Archive number, only present for canonical codes
    pub archive_id: Option<u32>,
    /// Fund number
    pub fund: Option<u32>,
    /// Inventory (opis) number
    pub inventory: Option<u32>,
    /// Case (delo) number
    pub case_number: Option<u32>,
}

impl ArchiveReference {
    /// Parses a canonical or legacy reference
    ///
    /// Never fails: unrecognized input yields an empty reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_report::domain::reference::ArchiveReference;
    ///
    /// let reference = ArchiveReference::parse("Ф.45, Оп.12, Д.89");
    /// assert_eq!(reference.fund, Some(45));
    /// assert_eq!(reference.inventory, Some(12));
    /// assert_eq!(reference.case_number, Some(89));
    /// assert_eq!(reference.archive_id, None);
    /// ```
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::default();
        }

        if let Some(code) = ArchiveCode::parse(input) {
            return Self::from(&code);
        }

        let patterns = legacy_patterns();
        let reference = Self {
            archive_id: None,
            fund: first_number(&patterns.fund, input),
            inventory: first_number(&patterns.inventory, input),
            case_number: first_number(&patterns.case_number, input),
        };

        if reference.is_empty() {
            tracing::debug!(input = %input, "No archive reference components recognized");
        }
        reference
    }

    /// True when no component was recognized
    pub fn is_empty(&self) -> bool {
        self.archive_id.is_none()
            && self.fund.is_none()
            && self.inventory.is_none()
            && self.case_number.is_none()
    }

    /// Zero-pads the components into a canonical code
    ///
    /// `default_archive_id` fills in the archive number for legacy references,
    /// which never carry one. Returns `None` if a component is missing or too
    /// wide for its slot.
    pub fn to_archive_code(&self, default_archive_id: Option<u32>) -> Option<ArchiveCode> {
        let archive_id = self.archive_id.or(default_archive_id)?;
        let components = ArchiveCodeComponents::new(
            format!("{archive_id:02}"),
            format!("{:04}", self.fund?),
            format!("{:04}", self.inventory?),
            format!("{:06}", self.case_number?),
        );
        ArchiveCode::from_components(&components).ok()
    }
}

impl From<&ArchiveCode> for ArchiveReference {
    fn from(code: &ArchiveCode) -> Self {
        Self {
            archive_id: code.archive_id().parse().ok(),
            fund: code.fund().parse().ok(),
            inventory: code.signature().parse().ok(),
            case_number: code.case_number().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_canonical() {
        let reference = ArchiveReference::parse("01-0203-0745-000002");
        assert_eq!(
            reference,
            ArchiveReference {
                archive_id: Some(1),
                fund: Some(203),
                inventory: Some(745),
                case_number: Some(2),
            }
        );
    }

    #[test_case("Фонд 10, опись 5, дело 20", 10, 5, 20; "long form")]
    #[test_case("Ф.5, Оп.1, Д.12", 5, 1, 12; "short form")]
    #[test_case("ф. 12, оп. 3, д. 45", 12, 3, 45; "lower case with spaces")]
    #[test_case("фонд: 7; опись: 2; дело № 301", 7, 2, 301; "colons and numero sign")]
    fn test_parse_legacy(input: &str, fund: u32, inventory: u32, case_number: u32) {
        let reference = ArchiveReference::parse(input);
        assert_eq!(reference.archive_id, None);
        assert_eq!(reference.fund, Some(fund));
        assert_eq!(reference.inventory, Some(inventory));
        assert_eq!(reference.case_number, Some(case_number));
    }

    #[test]
    fn test_letters_inside_words_do_not_match() {
        // The "д" at the end of "Фонд" is not a case marker
        let reference = ArchiveReference::parse("Фонд 10");
        assert_eq!(reference.fund, Some(10));
        assert_eq!(reference.case_number, None);
    }

    #[test]
    fn test_parse_unrecognized() {
        assert!(ArchiveReference::parse("").is_empty());
        assert!(ArchiveReference::parse("no reference here").is_empty());
    }

    #[test]
    fn test_to_archive_code_pads_components() {
        let reference = ArchiveReference::parse("Фонд 10, опись 5, дело 20");
        assert!(reference.to_archive_code(None).is_none());

        let code = reference.to_archive_code(Some(3)).unwrap();
        assert_eq!(code.full_code(), "03-0010-0005-000020");
    }

    #[test]
    fn test_to_archive_code_rejects_oversized_components() {
        let reference = ArchiveReference {
            archive_id: Some(1),
            fund: Some(12345),
            inventory: Some(1),
            case_number: Some(1),
        };
        assert!(reference.to_archive_code(None).is_none());
    }

    #[test]
    fn test_to_archive_code_requires_all_components() {
        let reference = ArchiveReference::parse("Ф.5, Оп.1");
        assert!(reference.to_archive_code(Some(1)).is_none());
    }
}
