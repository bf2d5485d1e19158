//! Report file naming

use chrono::{DateTime, Utc};

/// Default report base name
pub const DEFAULT_BASE_NAME: &str = "archive_report";

/// Source of the export instant
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds `<base>_<YYYY-MM-DD-HH-MM-SS>.csv` from a UTC instant
///
/// The timestamp is the ISO-8601 date and time with `T` and `:` replaced by
/// `-`. An empty base name falls back to [`DEFAULT_BASE_NAME`].
///
/// # Examples
///
/// ```
/// use archive_report::core::export::filename::generate_file_name;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 15, 14, 5, 9).unwrap();
/// assert_eq!(
///     generate_file_name("archive_report", at),
///     "archive_report_2024-03-15-14-05-09.csv"
/// );
/// ```
pub fn generate_file_name(base_name: &str, at: DateTime<Utc>) -> String {
    let base_name = match base_name.trim() {
        "" => DEFAULT_BASE_NAME,
        trimmed => trimmed,
    };
    format!("{base_name}_{}.csv", at.format("%Y-%m-%d-%H-%M-%S"))
}
