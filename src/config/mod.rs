//! Configuration management for archive-report.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! archive-report uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ARCHIVE_REPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use archive_report::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("archive-report.toml")?;
//!
//! println!("Template: {}", config.report.template);
//! println!("Output directory: {}", config.output.directory);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ReportSettings`] - Template, fields, grouping, file naming
//! - [`OutputConfig`] - Output directory, overwrite and verification
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [report]
//! template = "archiveBasic"
//! selected_fields = []
//! group_by_archive = false
//! base_name = "archive_report"
//! date_locale = "ru-RU"
//!
//! [output]
//! directory = "${ARCHIVE_REPORT_DIR}"
//! overwrite = false
//! verify = true
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, ArchiveReportConfig, LoggingConfig, OutputConfig, ReportSettings,
};
