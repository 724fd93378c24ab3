//! Configuration management for Shutter.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Shutter uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SHUTTER_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shutter::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shutter.toml")?;
//!
//! println!("Library: {}", config.library.snapshot_path.display());
//! println!("File server: {}", config.download.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`LibraryConfig`] - Local library snapshot
//! - [`DownloadConfig`] - File server, auth token, timeout and [`RetryConfig`]
//! - [`ExportConfig`] - Default destination and auto-resume
//! - [`StateConfig`] - Settings store location
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [library]
//! snapshot_path = "library.json"
//!
//! [download]
//! base_url = "https://files.example.com"
//! auth_token = "${SHUTTER_AUTH_TOKEN}"
//!
//! [export]
//! default_folder = "/home/me/Pictures/export"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DownloadConfig, ExportConfig, LibraryConfig, LoggingConfig, RetryConfig,
    ShutterConfig, StateConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
