//! Status command implementation
//!
//! This module implements the `status` command for displaying the persisted
//! export settings and the size of the destination's ledger.

use crate::adapters::local::{JsonSettingsStore, LocalExportBridge};
use crate::cli::commands::load_or_report;
use crate::core::state::SettingsManager;
use clap::Args;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("📊 Export Status");
        println!();

        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        let store = JsonSettingsStore::new(config.state.settings_path.clone());
        let settings = match SettingsManager::new(Arc::new(store))
            .load_export_settings()
            .await
        {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to load export settings");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        let Some(folder) = settings.folder.as_deref() else {
            println!("No export folder selected.");
            println!("Run 'shutter select-folder <PATH>' to choose one.");
            return Ok(0);
        };

        let state = if settings.status {
            "🔄 Active (will resume)"
        } else {
            "⏸️  Idle"
        };
        println!("  Folder: {}", folder.display());
        println!("  Export: {state}");

        let bridge = LocalExportBridge::new(None);
        match bridge.read_export_record(folder).await {
            Ok(record) => {
                println!("  Exported files: {}", record.len());
                match record.updated_at {
                    Some(at) => println!("  Last update: {}", at.format("%Y-%m-%d %H:%M:%S")),
                    None => println!("  Last update: Never"),
                }
            }
            Err(e) => {
                println!("  ❌ Failed to read export record");
                println!("     Error: {e}");
                return Ok(5);
            }
        }

        Ok(0)
    }
}
