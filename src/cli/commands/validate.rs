//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Shutter configuration file.

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

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Library Snapshot: {}", config.library.snapshot_path.display());
        println!("  File Server: {}", config.download.base_url);
        println!(
            "  Auth Token: {}",
            if config.download.auth_token.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!("  Timeout: {}s", config.download.timeout_seconds);
        println!(
            "  Retries: {} (initial {}ms, max {}ms, x{})",
            config.download.retry.max_retries,
            config.download.retry.initial_delay_ms,
            config.download.retry.max_delay_ms,
            config.download.retry.backoff_multiplier
        );
        match &config.export.default_folder {
            Some(folder) => println!("  Default Folder: {}", folder.display()),
            None => println!("  Default Folder: not set"),
        }
        println!("  Resume On Start: {}", config.export.resume_on_start);
        println!("  Settings File: {}", config.state.settings_path.display());
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let args = ValidateArgs {};
        let code = args.execute("/nonexistent/shutter.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_valid_file_passes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[library]
snapshot_path = "library.json"

[download]
base_url = "https://files.example.com"
"#
        )
        .unwrap();

        let args = ValidateArgs {};
        let code = args.execute(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(code, 0);
    }
}
