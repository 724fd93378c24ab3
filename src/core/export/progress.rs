//! Progress, tray and notification signals emitted during an export run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Snapshot of an export run's progress
///
/// Emitted once before the first file and again after every file, whether
/// it was skipped, exported, or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportProgress {
    /// Files processed so far
    pub current: usize,
    /// Files in this run
    pub total: usize,
    /// Files that failed so far
    pub failed: usize,
}

impl ExportProgress {
    /// Percentage of processed files
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.current as f64 / self.total as f64 * 100.0
    }
}

/// Caller-supplied progress observer
pub type ProgressCallback = Arc<dyn Fn(ExportProgress) + Send + Sync>;

/// Notifications sent to the host when an export changes state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportNotification {
    Start,
    InProgress,
    Finish,
    Failed,
    Abort,
}

impl ExportNotification {
    pub fn message(&self) -> &'static str {
        match self {
            ExportNotification::Start => "export started",
            ExportNotification::InProgress => "export already in progress",
            ExportNotification::Finish => "export finished",
            ExportNotification::Failed => "export failed",
            ExportNotification::Abort => "export aborted",
        }
    }
}

impl fmt::Display for ExportNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Status line shown in the host's tray
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TrayStatus {
    /// A run was accepted and is about to start
    Starting,
    /// Files processed so far
    Progress { processed: usize, total: usize },
    /// The last run left failed files behind
    RetryAvailable,
}

impl fmt::Display for TrayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrayStatus::Starting => write!(f, "starting export"),
            TrayStatus::Progress { processed, total } => {
                write!(f, "{processed} / {total} files exported")
            }
            TrayStatus::RetryAvailable => write!(f, "export failed - retry export"),
        }
    }
}

/// Lifecycle of the orchestrator
///
/// `Idle -> Starting -> Running -> (Aborted | FailedPartial | Finished) -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    #[default]
    Idle,
    Starting,
    Running,
    Aborted,
    FailedPartial,
    Finished,
}

impl ExportPhase {
    /// Whether a run currently owns the orchestrator
    pub fn is_active(&self) -> bool {
        !matches!(self, ExportPhase::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_status_text() {
        let status = TrayStatus::Progress {
            processed: 3,
            total: 10,
        };
        assert_eq!(status.to_string(), "3 / 10 files exported");
        assert_eq!(TrayStatus::Starting.to_string(), "starting export");
        assert_eq!(
            TrayStatus::RetryAvailable.to_string(),
            "export failed - retry export"
        );
    }

    #[test]
    fn test_notification_messages() {
        assert_eq!(ExportNotification::Start.to_string(), "export started");
        assert_eq!(
            ExportNotification::InProgress.to_string(),
            "export already in progress"
        );
        assert_eq!(ExportNotification::Abort.to_string(), "export aborted");
    }

    #[test]
    fn test_progress_percent() {
        let progress = ExportProgress {
            current: 1,
            total: 4,
            failed: 0,
        };
        assert_eq!(progress.percent(), 25.0);

        let empty = ExportProgress {
            current: 0,
            total: 0,
            failed: 0,
        };
        assert_eq!(empty.percent(), 100.0);
    }

    #[test]
    fn test_phase_activity() {
        assert!(!ExportPhase::Idle.is_active());
        assert!(ExportPhase::Running.is_active());
        assert_eq!(ExportPhase::default(), ExportPhase::Idle);
    }
}
