//! Export state: persisted settings and the per-directory ledger

pub mod manager;
pub mod record;
pub mod settings;

pub use manager::SettingsManager;
pub use record::{ExportRecord, EXPORT_RECORD_FILE};
pub use settings::{ExportSettings, EXPORT_SETTINGS_KEY};
