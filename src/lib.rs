//! # Shutter - photo library export
//!
//! Shutter copies every file of a photo library onto local disk, one folder
//! per collection, and remembers what it has written so that a later run only
//! fetches what is missing.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Exporting** library files through a single-flight coordinator that
//!   can be cancelled and that offers a retry of failed files
//! - **Recording** exported files in a per-destination ledger
//! - **Summarizing** collections for display, with a fixed category order
//!   and selectable sort schemes
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export orchestration and persisted export state
//! - [`adapters`] - Library, file server, settings and file-system collaborators
//! - [`domain`] - Files, collections, summaries and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shutter::adapters::create_collaborators;
//! use shutter::config::load_config;
//! use shutter::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("shutter.toml")?;
//!     let c = create_collaborators(&config)?;
//!     let coordinator = ExportCoordinator::new(
//!         c.library,
//!         c.bridge,
//!         c.downloader,
//!         c.settings,
//!         config.download.retry.clone(),
//!     );
//!
//!     let summary = coordinator.export_files(None).await.await;
//!     println!("Exported {} files", summary.exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`], whose error is
//! [`domain::ShutterError`]. Failures of single files do not abort a run;
//! they are collected in the run's [`core::export::ExportSummary`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
