//! Select-folder command implementation
//!
//! Selects the export destination and persists it in the settings store.

use crate::adapters::factory::create_collaborators;
use crate::cli::commands::load_or_report;
use crate::core::export::ExportCoordinator;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the select-folder command
#[derive(Args, Debug)]
pub struct SelectFolderArgs {
    /// Destination folder (defaults to export.default_folder)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl SelectFolderArgs {
    /// Execute the select-folder command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(mut config) = load_or_report(config_path) else {
            return Ok(2);
        };

        if let Some(path) = &self.path {
            config.export.default_folder = Some(path.clone());
        }

        let collaborators = create_collaborators(&config)?;
        let coordinator = ExportCoordinator::new(
            collaborators.library,
            collaborators.bridge,
            collaborators.downloader,
            collaborators.settings,
            config.download.retry.clone(),
        );

        let root = match coordinator.select_export_directory().await {
            Ok(Some(root)) => root,
            Ok(None) => {
                println!("❌ No export folder given");
                println!("   Pass a PATH or set export.default_folder in {config_path}");
                return Ok(2);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to select export folder");
                println!("❌ Failed to select export folder");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        coordinator.settings().set_export_folder(root.clone()).await?;
        tracing::info!(folder = %root.display(), "Export folder saved");

        println!("✅ Export folder set to {}", root.display());
        Ok(0)
    }
}
