//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting the result of
//! one export run.

use crate::domain::{FileId, ShutterError};
use std::time::Duration;
use uuid::Uuid;

/// How an export run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No destination folder was configured; nothing was attempted
    NoDestination,
    /// Every file was exported or already present
    Finished,
    /// The run completed but some files failed
    Failed,
    /// A stop was requested before the run completed
    Aborted,
    /// The run hit an unexpected error and stopped early
    Errored(String),
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Identifier of the run
    pub run_id: Uuid,

    /// How the run ended
    pub outcome: ExportOutcome,

    /// Number of files handed to the run
    pub total_files: usize,

    /// Number of files processed before the run ended
    pub processed: usize,

    /// Number of files downloaded and written in this run
    pub exported: usize,

    /// Number of files skipped because the ledger already had them
    pub skipped: usize,

    /// Files that failed in this run
    pub failed_files: Vec<FileId>,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during the run
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new summary for a run over `total_files` files
    pub fn new(run_id: Uuid, total_files: usize) -> Self {
        Self {
            run_id,
            outcome: ExportOutcome::Finished,
            total_files,
            processed: 0,
            exported: 0,
            skipped: 0,
            failed_files: Vec::new(),
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Summary of a run that could not start at all
    pub fn errored(run_id: Uuid, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut summary = Self::new(run_id, 0);
        summary.add_error(ExportError::new(ExportErrorType::Unknown, message.clone()));
        summary.outcome = ExportOutcome::Errored(message);
        summary
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Record a failed file together with the reason
    pub fn add_failure(&mut self, file_id: FileId, error: ExportError) {
        self.failed_files.push(file_id);
        self.errors.push(error.with_context(format!("file_id={file_id}")));
    }

    /// Whether the run stopped because a stop was requested
    pub fn is_aborted(&self) -> bool {
        self.outcome == ExportOutcome::Aborted
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.outcome == ExportOutcome::Finished && self.failed_files.is_empty()
    }

    /// Get success rate as a percentage of processed files
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 100.0;
        }
        let succeeded = self.processed.saturating_sub(self.failed_files.len());
        (succeeded as f64 / self.processed as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            outcome = ?self.outcome,
            total_files = self.total_files,
            processed = self.processed,
            exported = self.exported,
            skipped = self.skipped,
            failed = self.failed_files.len(),
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export run completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = ?error.context,
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Fetching file bytes failed
    Download,
    /// Writing the file or its sidecar failed
    Write,
    /// Updating the ledger failed
    Record,
    /// The file belongs to a collection that is not in the library
    MissingCollection,
    /// Settings could not be read or written
    Settings,
    /// Unknown error
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., file id, relative path)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Classify a domain error
    pub fn from_error(error: &ShutterError) -> Self {
        use crate::domain::BridgeError;

        let error_type = match error {
            ShutterError::Download(_) => ExportErrorType::Download,
            ShutterError::Bridge(BridgeError::RecordReadFailed(_))
            | ShutterError::Bridge(BridgeError::RecordWriteFailed(_)) => ExportErrorType::Record,
            ShutterError::Bridge(_) | ShutterError::Io(_) | ShutterError::Serialization(_) => {
                ExportErrorType::Write
            }
            ShutterError::Settings(_) => ExportErrorType::Settings,
            _ => ExportErrorType::Unknown,
        };
        Self::new(error_type, error.to_string())
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(match self.context.take() {
            Some(existing) => format!("{existing}, {context}"),
            None => context,
        });
        self
    }
}
