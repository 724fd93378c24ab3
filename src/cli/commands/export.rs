//! Export command implementation
//!
//! This module implements the `export` command, which writes every library
//! file into the destination folder and reports the run.

use crate::adapters::factory::create_collaborators;
use crate::adapters::local::LocalExportBridge;
use crate::cli::commands::load_or_report;
use crate::core::export::{
    ExportCoordinator, ExportHandle, ExportOutcome, ExportProgress, ExportSummary,
    ProgressCallback,
};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Export into this folder instead of the persisted one
    #[arg(long, value_name = "PATH")]
    pub folder: Option<PathBuf>,

    /// Retry the files that failed, once, before exiting
    #[arg(long)]
    pub retry_failed: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let Some(mut config) = load_or_report(config_path) else {
            return Ok(2); // Configuration error exit code
        };

        if let Some(folder) = &self.folder {
            tracing::info!(folder = %folder.display(), "Overriding export folder from CLI");
            config.export.default_folder = Some(folder.clone());
        }

        let collaborators = match create_collaborators(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create collaborators");
                eprintln!("Failed to initialize export: {e}");
                return Ok(5);
            }
        };
        let bridge = collaborators.bridge.clone();

        let coordinator = ExportCoordinator::new(
            collaborators.library,
            collaborators.bridge,
            collaborators.downloader,
            collaborators.settings,
            config.download.retry.clone(),
        );

        // Pick a destination when none is persisted or one was given on the CLI
        let settings = coordinator.settings().load_export_settings().await?;
        let mut destination = settings.folder.clone();
        if self.folder.is_some() || !settings.has_destination() {
            match coordinator.select_export_directory().await {
                Ok(Some(root)) => {
                    coordinator.settings().set_export_folder(root.clone()).await?;
                    destination = Some(root);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Failed to select export folder");
                    eprintln!("Failed to select export folder: {e}");
                    return Ok(5);
                }
            }
        }

        if !self.yes && destination.is_some() {
            println!("Export Configuration:");
            if let Some(folder) = &destination {
                println!("  Destination: {}", folder.display());
            }
            println!("  Library: {}", config.library.snapshot_path.display());
            println!("  File server: {}", config.download.base_url);
            println!("  Max retries: {}", config.download.retry.max_retries);
            println!();
            print!("Proceed with export? [y/N]: ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        println!("🚀 Starting export...");
        println!();

        let resumed = if config.export.resume_on_start {
            coordinator.resume_if_active(Some(progress_printer())).await?
        } else {
            None
        };
        let handle = match resumed {
            Some(handle) => {
                println!("Resuming an interrupted export");
                handle
            }
            None => coordinator.export_files(Some(progress_printer())).await,
        };

        let mut summary = await_run(handle, &bridge, &mut shutdown_signal).await;
        print_summary(&summary);

        if self.retry_failed && summary.outcome == ExportOutcome::Failed {
            if let Some(handle) = coordinator.retry_failed_export() {
                println!(
                    "🔁 Retrying {} failed file(s)...",
                    summary.failed_files.len()
                );
                summary = await_run(handle, &bridge, &mut shutdown_signal).await;
                print_summary(&summary);
            }
        }

        Ok(exit_code(&summary))
    }
}

fn progress_printer() -> ProgressCallback {
    Arc::new(|progress: ExportProgress| {
        print!(
            "\r  {} / {} files ({} failed)",
            progress.current, progress.total, progress.failed
        );
        let _ = io::stdout().flush();
        if progress.current == progress.total {
            println!();
        }
    })
}

/// Wait for the run, turning a shutdown signal into a stop request
async fn await_run(
    mut handle: ExportHandle,
    bridge: &LocalExportBridge,
    shutdown_signal: &mut watch::Receiver<bool>,
) -> ExportSummary {
    let mut watching = true;
    if *shutdown_signal.borrow_and_update() {
        bridge.request_stop();
        watching = false;
    }

    loop {
        tokio::select! {
            summary = &mut handle => return summary,
            changed = shutdown_signal.changed(), if watching => {
                if changed.is_err() {
                    watching = false;
                } else if *shutdown_signal.borrow_and_update() {
                    tracing::info!(run_id = %handle.run_id(), "Requesting export stop");
                    bridge.request_stop();
                    watching = false;
                }
            }
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    match &summary.outcome {
        ExportOutcome::NoDestination => {
            println!("❌ No export folder selected");
            println!("   Run 'shutter select-folder <PATH>' or pass --folder");
            return;
        }
        ExportOutcome::Finished => println!("✅ Export finished"),
        ExportOutcome::Failed => println!("⚠️  Export completed with failures"),
        ExportOutcome::Aborted => println!("⏹️  Export stopped"),
        ExportOutcome::Errored(message) => println!("❌ Export failed: {message}"),
    }

    println!();
    println!("📊 Export Summary:");
    println!("  Total Files: {}", summary.total_files);
    println!("  Processed: {}", summary.processed);
    println!("  Exported: {}", summary.exported);
    println!("  Already Exported: {}", summary.skipped);
    println!("  Failed: {}", summary.failed_files.len());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());

    if !summary.errors.is_empty() {
        println!();
        println!("  ⚠️  Errors:");
        for error in summary.errors.iter().take(10) {
            match &error.context {
                Some(context) => println!("    - {} ({context})", error.message),
                None => println!("    - {}", error.message),
            }
        }
        if summary.errors.len() > 10 {
            println!("    ... and {} more errors", summary.errors.len() - 10);
        }
    }
    println!();
}

fn exit_code(summary: &ExportSummary) -> i32 {
    match summary.outcome {
        ExportOutcome::Finished => 0,
        ExportOutcome::Failed => 1,
        ExportOutcome::NoDestination => 2,
        ExportOutcome::Errored(_) => 5,
        ExportOutcome::Aborted => 130,
    }
}
