//! Persisted export settings
//!
//! The settings record remembers the chosen destination and whether an export
//! is active. An active export is resumed the next time the process starts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Key the export settings are stored under
pub const EXPORT_SETTINGS_KEY: &str = "export";

/// Export settings record
///
/// # Examples
///
/// ```
/// use shutter::core::state::ExportSettings;
///
/// let settings: ExportSettings = serde_json::from_str(r#"{"folder":"/photos"}"#).unwrap();
/// assert!(!settings.status);
/// assert!(settings.has_destination());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Destination root directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,

    /// Whether an export is currently the active (auto-resumed) export
    #[serde(default)]
    pub status: bool,
}

impl ExportSettings {
    /// Whether a destination directory has been chosen
    pub fn has_destination(&self) -> bool {
        self.folder
            .as_ref()
            .is_some_and(|folder| !folder.as_os_str().is_empty())
    }
}
