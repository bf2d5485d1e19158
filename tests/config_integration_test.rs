//! Integration tests for configuration loading and validation
//!
//! Tests that read or modify `ARCHIVE_REPORT_*` variables hold `ENV_MUTEX`.

use archive_report::config::{load_config, load_config_or_default, parse_config};
use archive_report::core::fields::DateLocale;
use archive_report::core::templates::OutputFormat;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("ARCHIVE_REPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("ARCHIVE_REPORT_REPORT_TEMPLATE");
    std::env::remove_var("ARCHIVE_REPORT_REPORT_DATE_LOCALE");
    std::env::remove_var("ARCHIVE_REPORT_OUTPUT_DIRECTORY");
    std::env::remove_var("TEST_REPORT_DIR");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = env_lock();
    cleanup_env_vars();
    let toml_content = r#"
[application]
log_level = "debug"

[report]
template = "archiveBasic"
selected_fields = ["archiveCode", "caseNumber", "fio", "processingDate"]
output_format = "xlsx"
include_page_info = false
group_by_archive = true
base_name = "fund_0203"
date_locale = "en-US"
default_archive_id = 3

[output]
directory = "out/reports"
overwrite = true
verify = false

[logging]
local_enabled = true
local_path = "/tmp/archive-report-logs"
local_rotation = "hourly"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.report.selected_fields.len(), 4);
    assert_eq!(config.report.output_format, OutputFormat::Xlsx);
    assert_eq!(config.report.date_locale, DateLocale::EnUs);
    assert_eq!(config.report.default_archive_id, Some(3));
    assert_eq!(config.output.directory, "out/reports");
    assert!(config.output.overwrite);
    assert!(!config.output.verify);
    assert_eq!(config.logging.local_rotation, "hourly");

    let report = config.report_configuration().unwrap();
    assert_eq!(report.template, "archiveBasic");
    assert_eq!(
        report.selected_fields,
        vec!["archiveCode", "caseNumber", "fio", "processingDate"]
    );
    assert!(!report.include_page_info);
    assert!(report.group_by_archive);

    let options = config.export_options();
    assert_eq!(options.base_name, "fund_0203");
    assert_eq!(options.date_locale, DateLocale::EnUs);
}

#[test]
fn test_empty_config_uses_defaults() {
    let _lock = env_lock();
    cleanup_env_vars();

    let config = parse_config("").unwrap();
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.report.template, "archiveFull");
    assert_eq!(config.report.base_name, "archive_report");
    assert_eq!(config.report.date_locale, DateLocale::RuRu);
    assert!(!config.report.group_by_archive);
    assert_eq!(config.output.directory, "reports");
    assert!(!config.output.overwrite);
    assert!(config.output.verify);
    assert!(!config.logging.local_enabled);

    let report = config.report_configuration().unwrap();
    assert!(report.selected_fields.contains(&"archiveCode".to_string()));
    assert!(report.include_page_info);
}

#[test]
fn test_env_var_substitution() {
    let _lock = env_lock();
    cleanup_env_vars();
    std::env::set_var("TEST_REPORT_DIR", "/srv/archive/reports");

    let config = parse_config("[output]\ndirectory = \"${TEST_REPORT_DIR}\"\n").unwrap();
    cleanup_env_vars();

    assert_eq!(config.output.directory, "/srv/archive/reports");
}

#[test]
fn test_missing_env_var_is_reported() {
    let _lock = env_lock();
    cleanup_env_vars();

    let err = parse_config("[output]\ndirectory = \"${TEST_REPORT_DIR}\"\n").unwrap_err();
    assert!(err.to_string().contains("TEST_REPORT_DIR"));
}

#[test]
fn test_env_overrides_win_over_file() {
    let _lock = env_lock();
    cleanup_env_vars();
    std::env::set_var("ARCHIVE_REPORT_REPORT_TEMPLATE", "attributeOnly");
    std::env::set_var("ARCHIVE_REPORT_REPORT_DATE_LOCALE", "iso");
    std::env::set_var("ARCHIVE_REPORT_OUTPUT_DIRECTORY", "/data/out");

    let result = parse_config("[report]\ntemplate = \"archiveBasic\"\n");
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.report.template, "attributeOnly");
    assert_eq!(config.report.date_locale, DateLocale::Iso);
    assert_eq!(config.output.directory, "/data/out");
}

#[test]
fn test_invalid_env_override() {
    let _lock = env_lock();
    cleanup_env_vars();
    std::env::set_var("ARCHIVE_REPORT_REPORT_DATE_LOCALE", "fr-FR");

    let result = parse_config("");
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_validation_errors() {
    let _lock = env_lock();
    cleanup_env_vars();

    let cases = [
        "[application]\nlog_level = \"verbose\"\n",
        "[report]\ntemplate = \"monthly\"\n",
        "[report]\nselected_fields = [\"archiveCode\", \"opis\"]\n",
        "[report]\nbase_name = \"../escape\"\n",
        "[report]\nbase_name = \"  \"\n",
        "[report]\ndefault_archive_id = 100\n",
        "[output]\ndirectory = \"\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ];

    for case in cases {
        let err = parse_config(case).unwrap_err();
        assert!(
            err.to_string().contains("Configuration validation failed"),
            "{case}: {err}"
        );
    }
}

#[test]
fn test_explicit_fields_allow_custom_template_name() {
    let _lock = env_lock();
    cleanup_env_vars();

    let config =
        parse_config("[report]\ntemplate = \"custom\"\nselected_fields = [\"fio\"]\n").unwrap();
    let report = config.report_configuration().unwrap();
    assert_eq!(report.template, "custom");
    assert_eq!(report.selected_fields, vec!["fio"]);
}

#[test]
fn test_load_config_requires_file() {
    assert!(load_config("/nonexistent/archive-report.toml").is_err());
}

#[test]
fn test_load_config_or_default_without_file() {
    let _lock = env_lock();
    cleanup_env_vars();

    let config = load_config_or_default("/nonexistent/archive-report.toml").unwrap();
    assert_eq!(config.report.template, "archiveFull");
}
