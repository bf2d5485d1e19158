//! Parse command implementation
//!
//! This module implements the `parse` command, which shows how archive codes,
//! legacy references and scan file names are interpreted.

use crate::cli::EXIT_SUCCESS;
use crate::domain::{
    extract_archive_code_from_path, parse_archive_code, ArchiveCode, ArchiveReference,
    DocumentPageInfo,
};
use clap::Args;
use serde::Serialize;

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Values to parse (archive codes, references or file names)
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Archive number for legacy references
    #[arg(long)]
    pub default_archive_id: Option<u32>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Interpretation of one input value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedValue {
    /// The value as given
    pub input: String,
    /// Canonical code, from the value itself or embedded in a file name
    pub archive_code: Option<ArchiveCode>,
    /// Loose reference components
    pub reference: ArchiveReference,
    /// Page information when the value looks like a file name
    pub page_info: Option<DocumentPageInfo>,
}

impl ParsedValue {
    /// Interpret a value
    pub fn parse(input: &str, default_archive_id: Option<u32>) -> Self {
        let exact = parse_archive_code(input);
        let embedded = exact
            .is_none()
            .then(|| extract_archive_code_from_path(input))
            .flatten();

        let reference = ArchiveReference::parse(input);
        let archive_code = exact
            .clone()
            .or(embedded.clone())
            .or_else(|| reference.to_archive_code(default_archive_id));

        // Only a value with an embedded code or an image number is a file name
        let page_info = if embedded.is_some() || input.contains('.') {
            let info = DocumentPageInfo::from_file_name(input);
            (embedded.is_some() || !info.image_number.is_empty()).then_some(info)
        } else {
            None
        };

        Self {
            input: input.to_string(),
            archive_code,
            reference,
            page_info,
        }
    }
}

impl ParseArgs {
    /// Execute the parse command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let parsed: Vec<ParsedValue> = self
            .values
            .iter()
            .map(|value| ParsedValue::parse(value, self.default_archive_id))
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            return Ok(EXIT_SUCCESS);
        }

        for value in &parsed {
            println!("{}", value.input);
            match &value.archive_code {
                Some(code) => {
                    println!("  Archive code: {code}");
                    println!("    Archive: {}", code.archive_id());
                    println!("    Fund: {}", code.fund());
                    println!("    Signature: {}", code.signature());
                    println!("    Case: {}", code.case_number());
                }
                None => println!("  Archive code: not found"),
            }
            if value.archive_code.is_none() && !value.reference.is_empty() {
                let show = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
                println!(
                    "  Reference: fund {}, inventory {}, case {}",
                    show(value.reference.fund),
                    show(value.reference.inventory),
                    show(value.reference.case_number)
                );
            }
            if let Some(page_info) = &value.page_info {
                println!(
                    "  Page: {} (image {})",
                    page_info.page_number,
                    if page_info.image_number.is_empty() {
                        "-"
                    } else {
                        page_info.image_number.as_str()
                    }
                );
            }
        }

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_code() {
        let parsed = ParsedValue::parse(" 01-0203-0745-000002 ", None);
        assert_eq!(
            parsed.archive_code.as_ref().map(|c| c.full_code()),
            Some("01-0203-0745-000002")
        );
        assert!(parsed.page_info.is_none());
    }

    #[test]
    fn test_parse_file_name() {
        let parsed = ParsedValue::parse("01-0203-0745-000002_00000007.jpg", None);
        assert_eq!(
            parsed.archive_code.as_ref().map(|c| c.case_number()),
            Some("000002")
        );
        assert_eq!(parsed.page_info.map(|p| p.page_number), Some(7));
    }

    #[test]
    fn test_parse_legacy_reference() {
        let parsed = ParsedValue::parse("Фонд 10, опись 5, дело 20", None);
        assert!(parsed.archive_code.is_none());
        assert_eq!(parsed.reference.fund, Some(10));

        let parsed = ParsedValue::parse("Фонд 10, опись 5, дело 20", Some(2));
        assert_eq!(
            parsed.archive_code.map(ArchiveCode::into_inner),
            Some("02-0010-0005-000020".to_string())
        );
    }

    #[test]
    fn test_parse_unrecognized() {
        let parsed = ParsedValue::parse("cover.jpg", None);
        assert!(parsed.archive_code.is_none());
        assert!(parsed.reference.is_empty());
        assert!(parsed.page_info.is_none());
    }

    #[tokio::test]
    async fn test_execute_json() {
        let args = ParseArgs {
            values: vec!["01-0203-0745-000002".to_string()],
            default_archive_id: None,
            json: true,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_SUCCESS);
    }
}
