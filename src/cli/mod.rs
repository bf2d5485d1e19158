//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for archive-report using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "archive-report.toml";

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for configuration and usage errors
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code for a failed export precondition (no documents, no fields)
pub const EXIT_PRECONDITION_FAILED: i32 = 3;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// archive-report - archive code parsing and CSV report export
#[derive(Parser, Debug)]
#[command(name = "archive-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "ARCHIVE_REPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ARCHIVE_REPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export documents to a CSV report
    Export(commands::export::ExportArgs),

    /// Parse archive codes, references or file names
    Parse(commands::parse::ParseArgs),

    /// List the available report fields
    Fields(commands::fields::FieldsArgs),

    /// List the built-in report templates
    Templates(commands::templates::TemplatesArgs),

    /// Show statistics for a document set
    Stats(commands::stats::StatsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
