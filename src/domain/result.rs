//! Result type alias for archive-report
//!
//! This module provides a convenient Result type alias that uses ReportError
//! as the error type.

use super::errors::ReportError;

/// Result type alias for archive-report operations
///
/// # Examples
///
/// ```
/// use archive_report::domain::result::Result;
/// use archive_report::domain::errors::ReportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReportError::EmptyInput)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;
