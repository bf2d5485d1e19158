//! Report export
//!
//! This module renders documents into CSV reports and saves them.

pub mod csv;
pub mod exporter;
pub mod filename;
pub mod sink;
pub mod summary;

pub use csv::{create_report_headers, create_report_row, escape_csv_value};
pub use exporter::{export_report_to_csv, ExportOptions, ReportArtifact, ReportExporter};
pub use filename::{generate_file_name, Clock, FixedClock, SystemClock};
pub use sink::{FileSink, ReportSink, SavedReport};
pub use summary::{ExportResult, CSV_MIME_TYPE};
