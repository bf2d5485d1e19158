//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod fields;
pub mod init;
pub mod parse;
pub mod stats;
pub mod templates;
pub mod validate;

use crate::adapters::{DocumentSource, InputKind, IntakeAdapter, JsonFileSource};
use crate::core::filter::{parse_date_bound, DateBound, DocumentFilter};
use crate::domain::DocumentRecognitionResult;
use clap::Args;
use std::path::Path;

/// Document selection flags shared by `export` and `stats`
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Keep documents from these funds (comma-separated numbers)
    #[arg(long, value_delimiter = ',')]
    pub fund: Vec<u32>,

    /// Keep documents from these archives (comma-separated numbers)
    #[arg(long, value_delimiter = ',')]
    pub archive_id: Vec<u32>,

    /// Keep documents processed on or after this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Keep documents processed on or before this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,

    /// Keep documents whose file name contains this text (case-insensitive)
    #[arg(long)]
    pub file_name: Option<String>,
}

impl FilterArgs {
    /// Builds the document filter, printing the failure
    ///
    /// Returns `None` after reporting the error to the user.
    pub(crate) fn to_filter(&self) -> Option<DocumentFilter> {
        let parse_bound = |value: &Option<String>, bound: DateBound| {
            value
                .as_deref()
                .map(|value| parse_date_bound(value, bound))
                .transpose()
        };

        let (from, to) = match (
            parse_bound(&self.from, DateBound::Start),
            parse_bound(&self.to, DateBound::End),
        ) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => {
                println!("❌ {e}");
                return None;
            }
        };

        let mut filter = DocumentFilter::new()
            .with_funds(self.fund.clone())
            .with_archive_ids(self.archive_id.clone())
            .processed_between(from, to);
        if let Some(file_name) = &self.file_name {
            filter = filter.with_file_name(file_name.clone());
        }

        if let Err(e) = filter.validate() {
            println!("❌ {e}");
            return None;
        }
        Some(filter)
    }
}

/// Splits a comma-separated list, dropping empty entries
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Loads documents for a command, printing the failure
///
/// Returns `None` after reporting the error to the user.
pub(crate) async fn load_input(
    path: &Path,
    input_kind: &str,
    default_archive_id: Option<u32>,
) -> Option<Vec<DocumentRecognitionResult>> {
    let kind: InputKind = match input_kind.parse() {
        Ok(kind) => kind,
        Err(e) => {
            println!("❌ {e}");
            return None;
        }
    };

    let source =
        JsonFileSource::new(path, kind).with_adapter(IntakeAdapter::new(default_archive_id));
    match source.load().await {
        Ok(documents) => Some(documents),
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to load input");
            println!("❌ Failed to load {}", source.describe());
            println!("   Error: {e}");
            None
        }
    }
}
