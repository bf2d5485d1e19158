//! Document selection before export
//!
//! A [`DocumentFilter`] narrows a document set by archive number, fund,
//! processing date range and file name. Empty criteria select everything.

use crate::domain::{ArchiveCode, DocumentRecognitionResult, ReportError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Which end of a date range a bound closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Inclusive lower bound; a plain date means the start of that day
    Start,
    /// Inclusive upper bound; a plain date means the end of that day
    End,
}

/// Parses a date range bound
///
/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date, read as UTC.
///
/// # Examples
///
/// ```
/// use archive_report::core::filter::{parse_date_bound, DateBound};
///
/// let end = parse_date_bound("2024-03-15", DateBound::End).unwrap();
/// assert_eq!(end.to_rfc3339(), "2024-03-15T23:59:59.999+00:00");
/// ```
pub fn parse_date_bound(value: &str, bound: DateBound) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant);
    }

    let invalid = || {
        ReportError::Validation(format!(
            "Invalid date '{value}'. Expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    };
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
    let instant = match bound {
        DateBound::Start => date.and_hms_opt(0, 0, 0),
        DateBound::End => date.and_hms_milli_opt(23, 59, 59, 999),
    }
    .ok_or_else(invalid)?;

    Ok(instant.and_utc().fixed_offset())
}

/// Selection criteria over recognized documents
///
/// Fund and archive numbers are compared numerically, so `203` matches the
/// fund component `0203`. Documents without an archive code never match a
/// fund or archive list. Documents without a processing date are not
/// excluded by the date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    /// Fund numbers to keep (empty = all)
    pub funds: Vec<u32>,
    /// Archive numbers to keep (empty = all)
    pub archive_ids: Vec<u32>,
    /// Earliest processing date, inclusive
    pub processed_from: Option<DateTime<FixedOffset>>,
    /// Latest processing date, inclusive
    pub processed_to: Option<DateTime<FixedOffset>>,
    /// Case-insensitive file name substring
    pub file_name: Option<String>,
}

impl DocumentFilter {
    /// Creates a filter that selects every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to the given fund numbers
    pub fn with_funds(mut self, funds: Vec<u32>) -> Self {
        self.funds = funds;
        self
    }

    /// Restricts to the given archive numbers
    pub fn with_archive_ids(mut self, archive_ids: Vec<u32>) -> Self {
        self.archive_ids = archive_ids;
        self
    }

    /// Restricts to a processing date range; either end may be open
    pub fn processed_between(
        mut self,
        from: Option<DateTime<FixedOffset>>,
        to: Option<DateTime<FixedOffset>>,
    ) -> Self {
        self.processed_from = from;
        self.processed_to = to;
        self
    }

    /// Restricts to file names containing the given text
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// True if no criterion is set
    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
            && self.archive_ids.is_empty()
            && self.processed_from.is_none()
            && self.processed_to.is_none()
            && self.file_name_needle().is_none()
    }

    /// Checks that the date range is not inverted
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let (Some(from), Some(to)) = (self.processed_from, self.processed_to) {
            if from > to {
                return Err(format!(
                    "Date range start {} is after its end {}",
                    from.to_rfc3339(),
                    to.to_rfc3339()
                ));
            }
        }
        Ok(())
    }

    /// True if the document satisfies every criterion
    pub fn matches(&self, document: &DocumentRecognitionResult) -> bool {
        let code = document.archive_code.as_ref();

        if !self.funds.is_empty() && !component_in(code, ArchiveCode::fund, &self.funds) {
            return false;
        }
        if !self.archive_ids.is_empty()
            && !component_in(code, ArchiveCode::archive_id, &self.archive_ids)
        {
            return false;
        }

        if let Some(date) = document.processing_date {
            if self.processed_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.processed_to.is_some_and(|to| date > to) {
                return false;
            }
        }

        if let Some(needle) = self.file_name_needle() {
            if !document
                .page_info
                .file_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        true
    }

    /// Keeps the matching documents in input order
    pub fn apply(
        &self,
        documents: Vec<DocumentRecognitionResult>,
    ) -> Vec<DocumentRecognitionResult> {
        if self.is_empty() {
            return documents;
        }

        let before = documents.len();
        let kept: Vec<_> = documents
            .into_iter()
            .filter(|document| self.matches(document))
            .collect();
        tracing::debug!(before, after = kept.len(), "Filtered documents");
        kept
    }

    fn file_name_needle(&self) -> Option<&str> {
        self.file_name.as_deref().filter(|needle| !needle.is_empty())
    }
}

fn component_in(
    code: Option<&ArchiveCode>,
    component: fn(&ArchiveCode) -> &str,
    allowed: &[u32],
) -> bool {
    code.and_then(|code| component(code).parse::<u32>().ok())
        .is_some_and(|value| allowed.contains(&value))
}
