//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ArchiveReportConfig;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "ARCHIVE_REPORT_";

/// Serializes tests that read or mutate `ARCHIVE_REPORT_*` variables
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern compiles")
    })
}

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ArchiveReportConfig
/// 4. Applies environment variable overrides (ARCHIVE_REPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use archive_report::config::loader::load_config;
///
/// let config = load_config("archive-report.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ArchiveReportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    parse_config(&contents)
}

/// Loads the file if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ArchiveReportConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = ArchiveReportConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text
///
/// Runs substitution, overrides and validation like [`load_config`].
pub fn parse_config(contents: &str) -> Result<ArchiveReportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ArchiveReportConfig = toml::from_str(&contents)
        .map_err(|e| ReportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &ArchiveReportConfig) -> Result<()> {
    config.validate().map_err(|e| {
        ReportError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ReportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ReportError::Configuration(format!(
            "Invalid value '{value}' for environment variable {ENV_PREFIX}{key}"
        ))
    })
}

/// Applies environment variable overrides using ARCHIVE_REPORT_* prefix
///
/// Environment variables follow the pattern: ARCHIVE_REPORT_<SECTION>_<KEY>,
/// for example ARCHIVE_REPORT_REPORT_TEMPLATE or ARCHIVE_REPORT_OUTPUT_DIRECTORY.
/// List values are comma-separated.
fn apply_env_overrides(config: &mut ArchiveReportConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Report overrides
    if let Some(val) = env_var("REPORT_TEMPLATE") {
        config.report.template = val;
    }
    if let Some(val) = env_var("REPORT_SELECTED_FIELDS") {
        config.report.selected_fields = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(val) = env_var("REPORT_OUTPUT_FORMAT") {
        config.report.output_format = val.parse()?;
    }
    if let Some(val) = env_var("REPORT_INCLUDE_PAGE_INFO") {
        config.report.include_page_info = Some(parse_env("REPORT_INCLUDE_PAGE_INFO", &val)?);
    }
    if let Some(val) = env_var("REPORT_GROUP_BY_ARCHIVE") {
        config.report.group_by_archive = parse_env("REPORT_GROUP_BY_ARCHIVE", &val)?;
    }
    if let Some(val) = env_var("REPORT_BASE_NAME") {
        config.report.base_name = val;
    }
    if let Some(val) = env_var("REPORT_DATE_LOCALE") {
        config.report.date_locale = val.parse()?;
    }
    if let Some(val) = env_var("REPORT_DEFAULT_ARCHIVE_ID") {
        config.report.default_archive_id = Some(parse_env("REPORT_DEFAULT_ARCHIVE_ID", &val)?);
    }

    // Output overrides
    if let Some(val) = env_var("OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Some(val) = env_var("OUTPUT_OVERWRITE") {
        config.output.overwrite = parse_env("OUTPUT_OVERWRITE", &val)?;
    }
    if let Some(val) = env_var("OUTPUT_VERIFY") {
        config.output.verify = parse_env("OUTPUT_VERIFY", &val)?;
    }

    // Logging overrides
    if let Some(val) = env_var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
