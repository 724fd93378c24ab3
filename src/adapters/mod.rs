//! External system integrations for Shutter.
//!
//! This module provides the collaborators the export coordinator drives:
//!
//! - [`traits`] - The `Library`, `SettingsStore`, `ExportBridge` and
//!   `Downloader` seams
//! - [`local`] - JSON library snapshot, JSON settings file and the local
//!   file-system bridge
//! - [`http`] - Streaming HTTP downloads
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations.
//!
//! ```rust,no_run
//! use shutter::adapters::create_collaborators;
//! use shutter::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shutter.toml")?;
//! let collaborators = create_collaborators(&config)?;
//!
//! let files = collaborators.library.get_local_files().await?;
//! println!("{} files in library", files.len());
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod http;
pub mod local;
pub mod traits;

pub use factory::{create_collaborators, Collaborators};
pub use traits::{ByteStream, Downloader, ExportBridge, Library, Listener, SettingsStore};
