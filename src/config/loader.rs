//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ShutterConfig;
use crate::config::secret_string;
use crate::domain::errors::ShutterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ShutterConfig
/// 4. Applies environment variable overrides (SHUTTER_* prefix)
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
/// use shutter::config::loader::load_config;
///
/// let config = load_config("shutter.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ShutterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShutterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShutterError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ShutterConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ShutterError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ShutterError::Configuration(format!("Invalid substitution pattern: {e}")))?;
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
        return Err(ShutterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parses an override value, naming the variable on failure
fn parse_override<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ShutterError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using SHUTTER_* prefix
///
/// Environment variables follow the pattern: SHUTTER_<SECTION>_<KEY>
/// For example: SHUTTER_DOWNLOAD_BASE_URL, SHUTTER_EXPORT_DEFAULT_FOLDER
fn apply_env_overrides(config: &mut ShutterConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("SHUTTER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Library overrides
    if let Some(val) = var("SHUTTER_LIBRARY_SNAPSHOT_PATH") {
        config.library.snapshot_path = PathBuf::from(val);
    }

    // Download overrides
    if let Some(val) = var("SHUTTER_DOWNLOAD_BASE_URL") {
        config.download.base_url = val;
    }
    if let Some(val) = var("SHUTTER_DOWNLOAD_AUTH_TOKEN") {
        config.download.auth_token = Some(secret_string(val));
    }
    if let Some(val) = var("SHUTTER_DOWNLOAD_TIMEOUT_SECONDS") {
        config.download.timeout_seconds = parse_override("SHUTTER_DOWNLOAD_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = var("SHUTTER_DOWNLOAD_MAX_RETRIES") {
        config.download.retry.max_retries = parse_override("SHUTTER_DOWNLOAD_MAX_RETRIES", &val)?;
    }

    // Export overrides
    if let Some(val) = var("SHUTTER_EXPORT_DEFAULT_FOLDER") {
        config.export.default_folder = Some(PathBuf::from(val));
    }
    if let Some(val) = var("SHUTTER_EXPORT_RESUME_ON_START") {
        config.export.resume_on_start = parse_override("SHUTTER_EXPORT_RESUME_ON_START", &val)?;
    }

    // State overrides
    if let Some(val) = var("SHUTTER_STATE_SETTINGS_PATH") {
        config.state.settings_path = PathBuf::from(val);
    }

    // Logging overrides
    if let Some(val) = var("SHUTTER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("SHUTTER_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("SHUTTER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
