//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the archive-report configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let report = match config.report_configuration() {
            Ok(report) => report,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Template: {}", report.template);
        println!("  Fields: {}", report.selected_fields.join(", "));
        println!("  Output Format: {}", report.output_format);
        println!("  Group By Archive: {}", report.group_by_archive);
        println!("  Date Locale: {}", config.report.date_locale);
        println!("  Base Name: {}", config.report.base_name);
        if let Some(archive_id) = config.report.default_archive_id {
            println!("  Default Archive: {archive_id:02}");
        }
        println!("  Output Directory: {}", config.output.directory);
        println!("  Overwrite: {}", config.output.overwrite);
        println!("  Verify: {}", config.output.verify);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}
