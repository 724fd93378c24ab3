//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod collections;
pub mod export;
pub mod init;
pub mod select_folder;
pub mod status;
pub mod validate;

use crate::config::{load_config, ShutterConfig};

/// Load the configuration, printing the failure the way every command does
///
/// Returns `None` after printing when the file cannot be loaded or validated.
pub(crate) fn load_or_report(config_path: &str) -> Option<ShutterConfig> {
    match load_config(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            None
        }
    }
}
