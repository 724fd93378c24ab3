//! Configuration schema types
//!
//! This module defines the configuration structure for Shutter.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Shutter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Local library snapshot
    pub library: LibraryConfig,

    /// Download transport
    pub download: DownloadConfig,

    /// Export destination settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Persisted settings store
    #[serde(default)]
    pub state: StateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShutterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.library.validate()?;
        self.download.validate()?;
        self.export.validate()?;
        self.state.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
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

/// Local library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// JSON snapshot holding `files` and `collections`
    pub snapshot_path: PathBuf,
}

impl LibraryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err("library.snapshot_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err("download.retry.max_retries must be <= 10".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("download.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(
                "download.retry.initial_delay_ms must be <= download.retry.max_delay_ms"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Download transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Base URL of the file server
    pub base_url: String,

    /// Auth token sent as `X-Auth-Token`
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub auth_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry policy for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl DownloadConfig {
    fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid download.base_url '{}': {e}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "download.base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("download.timeout_seconds must be > 0".to_string());
        }

        if self
            .auth_token
            .as_ref()
            .is_some_and(|token| token.expose_secret().is_empty())
        {
            return Err("download.auth_token cannot be blank when set".to_string());
        }

        self.retry.validate()
    }
}

/// Export destination configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Directory offered when the user selects an export destination
    #[serde(default)]
    pub default_folder: Option<PathBuf>,

    /// Resume an export left active by a previous process
    #[serde(default)]
    pub resume_on_start: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(folder) = &self.default_folder {
            if folder.as_os_str().is_empty() {
                return Err("export.default_folder cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Settings store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// JSON file backing the settings store
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
        }
    }
}

impl StateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.settings_path.as_os_str().is_empty() {
            return Err("state.settings_path cannot be empty".to_string());
        }
        Ok(())
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

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("shutter_settings.json")
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
