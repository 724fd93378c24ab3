//! Collaborator factory
//!
//! Builds the concrete collaborators for a configuration.

use crate::adapters::http::HttpDownloader;
use crate::adapters::local::{JsonLibrary, JsonSettingsStore, LocalExportBridge};
use crate::adapters::traits::{Downloader, Library, SettingsStore};
use crate::config::ShutterConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Collaborators of the export coordinator
///
/// The bridge is kept concrete so the host can trigger stop and retry
/// requests on it.
pub struct Collaborators {
    pub library: Arc<dyn Library>,
    pub bridge: Arc<LocalExportBridge>,
    pub downloader: Arc<dyn Downloader>,
    pub settings: Arc<dyn SettingsStore>,
}

/// Create the collaborators described by the configuration
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created
pub fn create_collaborators(config: &ShutterConfig) -> Result<Collaborators> {
    tracing::debug!(
        snapshot = %config.library.snapshot_path.display(),
        settings = %config.state.settings_path.display(),
        base_url = %config.download.base_url,
        "Creating collaborators"
    );

    let downloader = HttpDownloader::new(&config.download)?;

    Ok(Collaborators {
        library: Arc::new(JsonLibrary::new(config.library.snapshot_path.clone())),
        bridge: Arc::new(LocalExportBridge::new(config.export.default_folder.clone())),
        downloader: Arc::new(downloader),
        settings: Arc::new(JsonSettingsStore::new(config.state.settings_path.clone())),
    })
}
