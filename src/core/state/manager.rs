//! Settings manager for the export settings record
//!
//! Typed access to the `"export"` key of the settings store.

use crate::adapters::traits::SettingsStore;
use crate::core::state::settings::{ExportSettings, EXPORT_SETTINGS_KEY};
use crate::domain::{Result, ShutterError};
use std::path::PathBuf;
use std::sync::Arc;

/// Settings manager
///
/// Loads and saves [`ExportSettings`] through a [`SettingsStore`]. Each call
/// is a single-key read or write; the store provides atomicity.
pub struct SettingsManager {
    /// Settings storage backend
    store: Arc<dyn SettingsStore>,
}

impl SettingsManager {
    /// Create a new SettingsManager over a settings store
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Load the export settings, or the defaults when none are stored
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the stored value is malformed.
    pub async fn load_export_settings(&self) -> Result<ExportSettings> {
        match self.store.get(EXPORT_SETTINGS_KEY).await? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                ShutterError::Settings(format!("Malformed export settings: {e}"))
            }),
            None => Ok(ExportSettings::default()),
        }
    }

    /// Save the export settings
    pub async fn save_export_settings(&self, settings: &ExportSettings) -> Result<()> {
        let value = serde_json::to_value(settings)?;
        self.store.set(EXPORT_SETTINGS_KEY, value).await
    }

    /// Persist whether an export is active
    pub async fn set_export_status(&self, active: bool) -> Result<()> {
        let mut settings = self.load_export_settings().await?;
        settings.status = active;
        tracing::debug!(active, "Persisting export status");
        self.save_export_settings(&settings).await
    }

    /// Persist the destination directory
    pub async fn set_export_folder(&self, folder: PathBuf) -> Result<()> {
        let mut settings = self.load_export_settings().await?;
        tracing::info!(folder = %folder.display(), "Persisting export folder");
        settings.folder = Some(folder);
        self.save_export_settings(&settings).await
    }
}
