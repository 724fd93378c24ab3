//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shutter.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Shutter configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set SHUTTER_DOWNLOAD_AUTH_TOKEN in your environment or .env");
                println!("  3. Validate configuration: shutter validate-config");
                println!("  4. Choose a destination: shutter select-folder <PATH>");
                println!("  5. Run export: shutter export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_config() -> String {
        r#"# Shutter Configuration File
# Resumable export of a photo library to local disk

[application]
log_level = "info"  # trace | debug | info | warn | error

[library]
# JSON snapshot with "files" and "collections" arrays
snapshot_path = "library.json"

[download]
base_url = "https://files.example.com/"
auth_token = "${SHUTTER_DOWNLOAD_AUTH_TOKEN}"
timeout_seconds = 60

[download.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[export]
# default_folder = "/home/me/Pictures/shutter"
resume_on_start = true

[state]
settings_path = "shutter_settings.json"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
