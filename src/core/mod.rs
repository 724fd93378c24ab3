//! Core business logic for Shutter.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration, path derivation, progress and retry
//! - [`state`] - Persisted export settings and the per-directory ledger
//!
//! # Export Workflow
//!
//! 1. **Load Library**: Read files and collections
//! 2. **Single-flight**: Join the run in flight, or start a new one
//! 3. **Prepare**: Read the destination and its ledger, create collection folders
//! 4. **Export**: For each file, skip if recorded, otherwise download, write
//!    the file and its metadata sidecar, then record it
//! 5. **Report**: Send one terminal notification and offer a retry for failures
//!
//! # Example
//!
//! ```rust,no_run
//! use shutter::adapters::create_collaborators;
//! use shutter::config::load_config;
//! use shutter::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shutter.toml")?;
//! let collaborators = create_collaborators(&config)?;
//!
//! let coordinator = ExportCoordinator::new(
//!     collaborators.library,
//!     collaborators.bridge,
//!     collaborators.downloader,
//!     collaborators.settings,
//!     config.download.retry.clone(),
//! );
//!
//! let summary = coordinator.export_files(None).await.await;
//! println!("Exported: {}", summary.exported);
//! println!("Failed: {}", summary.failed_files.len());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod state;
