//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - JSON-formatted log files with rotation
//! - Helper macros for export events
//!
//! # Example
//!
//! ```no_run
//! use archive_report::logging::init_logging;
//! use archive_report::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a report export
///
/// # Example
///
/// ```no_run
/// use archive_report::log_export_start;
///
/// log_export_start!("archiveBasic", 120, 4);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($template:expr, $records:expr, $fields:expr) => {
        tracing::info!(
            template = %$template,
            records = $records,
            fields = $fields,
            "Starting report export"
        );
    };
}

/// Log the completion of a report export
///
/// # Example
///
/// ```no_run
/// use archive_report::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, Duration::from_millis(15));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Report rendered"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use archive_report::log_error_with_context;
/// use archive_report::domain::ReportError;
///
/// let error = ReportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log export progress
///
/// # Example
///
/// ```no_run
/// use archive_report::log_batch_processing;
///
/// log_batch_processing!(100, 1000);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Rendering rows"
        );
    };
}
