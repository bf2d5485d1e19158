//! Configuration schema types
//!
//! This module defines the configuration structure for archive-report.

use crate::core::export::filename::DEFAULT_BASE_NAME;
use crate::core::export::{ExportOptions, FileSink};
use crate::core::fields::{DateLocale, FieldRegistry};
use crate::core::templates::{OutputFormat, ReportConfiguration, ReportTemplate};
use serde::{Deserialize, Serialize};

/// Main archive-report configuration
///
/// This is the root configuration structure that maps to the TOML file. Every
/// section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveReportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Report content settings
    #[serde(default)]
    pub report: ReportSettings,

    /// Where reports are saved
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArchiveReportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.report.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds the export request described by the `[report]` section
    ///
    /// # Errors
    ///
    /// Returns an error if no fields are selected and the template is unknown
    pub fn report_configuration(&self) -> Result<ReportConfiguration, String> {
        self.report.to_report_configuration()
    }

    /// Rendering options for the exporter
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            base_name: self.report.base_name.clone(),
            date_locale: self.report.date_locale,
        }
    }

    /// File sink for the `[output]` section
    pub fn file_sink(&self) -> FileSink {
        FileSink::new(&self.output.directory)
            .with_overwrite(self.output.overwrite)
            .with_verify(self.output.verify)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Report content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Built-in template id
    #[serde(default = "default_template")]
    pub template: String,

    /// Field keys in column order; empty means the template's fields
    #[serde(default)]
    pub selected_fields: Vec<String>,

    /// Requested output format (csv, xlsx, json); CSV is always produced
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Overrides the page-info flag derived from the selected fields
    #[serde(default)]
    pub include_page_info: Option<bool>,

    /// Sort documents by archive code and page before export
    #[serde(default)]
    pub group_by_archive: bool,

    /// Report file name prefix
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Locale of the processing date column (ru-RU, en-US, iso)
    #[serde(default)]
    pub date_locale: DateLocale,

    /// Archive number for legacy references that carry none
    #[serde(default)]
    pub default_archive_id: Option<u32>,
}

impl ReportSettings {
    fn validate(&self) -> Result<(), String> {
        if self.selected_fields.is_empty() && ReportTemplate::find(&self.template).is_none() {
            let known: Vec<_> = ReportTemplate::builtin().iter().map(|t| t.id).collect();
            return Err(format!(
                "Unknown report.template '{}'. Must be one of: {}",
                self.template,
                known.join(", ")
            ));
        }

        let unknown = FieldRegistry::global().unknown_keys(&self.selected_fields);
        if !unknown.is_empty() {
            return Err(format!(
                "Unknown report.selected_fields: {}",
                unknown.join(", ")
            ));
        }

        if self.base_name.trim().is_empty() {
            return Err("report.base_name cannot be empty".to_string());
        }
        if self.base_name.contains(['/', '\\']) {
            return Err(format!(
                "report.base_name '{}' must not contain path separators",
                self.base_name
            ));
        }

        if let Some(archive_id) = self.default_archive_id {
            if archive_id > 99 {
                return Err(format!(
                    "report.default_archive_id must be between 0 and 99, got {archive_id}"
                ));
            }
        }

        Ok(())
    }

    /// Builds the export request
    ///
    /// # Errors
    ///
    /// Returns an error if no fields are selected and the template is unknown
    pub fn to_report_configuration(&self) -> Result<ReportConfiguration, String> {
        let mut config = if self.selected_fields.is_empty() {
            let template = ReportTemplate::find(&self.template)
                .ok_or_else(|| format!("Unknown report template '{}'", self.template))?;
            ReportConfiguration::from_template(template)
        } else {
            ReportConfiguration::with_fields(self.template.clone(), self.selected_fields.clone())
        };

        if let Some(include_page_info) = self.include_page_info {
            config.include_page_info = include_page_info;
        }

        Ok(config
            .with_output_format(self.output_format)
            .with_group_by_archive(self.group_by_archive))
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            template: default_template(),
            selected_fields: Vec::new(),
            output_format: OutputFormat::default(),
            include_page_info: None,
            group_by_archive: false,
            base_name: default_base_name(),
            date_locale: DateLocale::default(),
            default_archive_id: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory reports are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Replace an existing report with the same name
    #[serde(default)]
    pub overwrite: bool,

    /// Read saved reports back and compare checksums
    #[serde(default = "default_true")]
    pub verify: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            overwrite: false,
            verify: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_template() -> String {
    ReportTemplate::DEFAULT_ID.to_string()
}

fn default_base_name() -> String {
    DEFAULT_BASE_NAME.to_string()
}

fn default_output_directory() -> String {
    "reports".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
