//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = crate::cli::DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include comments for every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing archive-report configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. List available columns: archive-report fields");
                println!("  3. Validate configuration: archive-report validate-config");
                println!("  4. Run export: archive-report export --input documents.json");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# archive-report configuration

[application]
log_level = "info"

[report]
template = "archiveFull"
# selected_fields = ["archiveCode", "fio", "date"]
output_format = "csv"
group_by_archive = false
base_name = "archive_report"
date_locale = "ru-RU"

[output]
directory = "reports"
overwrite = false
verify = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# archive-report configuration
#
# Every section is optional. Values may reference environment variables
# with ${VAR} and can be overridden with ARCHIVE_REPORT_<SECTION>_<KEY>,
# e.g. ARCHIVE_REPORT_OUTPUT_DIRECTORY.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Report Content
# ============================================================================
[report]
# Built-in template: archiveFull, archiveBasic, fullText, attributeOnly,
# archiveStructure (see `archive-report templates`)
template = "archiveFull"

# Explicit column list; overrides the template's fields when non-empty
# (see `archive-report fields`)
# selected_fields = ["archiveCode", "fund", "caseNumber", "fio", "date"]

# Only "csv" is produced; "xlsx" and "json" are exported as CSV
output_format = "csv"

# Overrides whether page columns are considered part of the report
# include_page_info = true

# Sort documents by archive code and page before export (default: input order)
group_by_archive = false

# Report file name prefix: <base_name>_YYYY-MM-DD-HH-MM-SS.csv
base_name = "archive_report"

# Processing date format: ru-RU, en-US or iso
date_locale = "ru-RU"

# Archive number used to complete legacy references
# ("Фонд 10, опись 5, дело 20") found in intake records
# default_archive_id = 1

# ============================================================================
# Output
# ============================================================================
[output]
# Directory for saved reports (created if missing)
directory = "reports"

# Replace an existing report with the same name
overwrite = false

# Re-read the saved file and compare its SHA-256 checksum
verify = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON log files in addition to console output
local_enabled = false

# Log file directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
