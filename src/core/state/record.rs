//! Resumability ledger
//!
//! Each destination directory carries a record of the relative paths that
//! were fully exported into it. A path is only added after both the file and
//! its metadata sidecar are on disk, and paths are never removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// File name of the ledger inside a destination directory
pub const EXPORT_RECORD_FILE: &str = "export_status.json";

/// Ledger of exported paths for one destination directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Relative paths already exported
    #[serde(default)]
    pub exported_files: BTreeSet<String>,

    /// Last time the ledger changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExportRecord {
    /// Whether `relative_path` was already exported
    pub fn contains(&self, relative_path: &str) -> bool {
        self.exported_files.contains(relative_path)
    }

    /// Add `relative_path`, returning `false` if it was already present
    pub fn record(&mut self, relative_path: impl Into<String>) -> bool {
        let inserted = self.exported_files.insert(relative_path.into());
        if inserted {
            self.updated_at = Some(Utc::now());
        }
        inserted
    }

    /// Number of exported paths
    pub fn len(&self) -> usize {
        self.exported_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exported_files.is_empty()
    }
}
