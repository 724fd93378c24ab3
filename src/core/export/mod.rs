//! Export orchestration
//!
//! This module provides the core export logic for Shutter, including:
//! - The single-flight export coordinator
//! - Destination path derivation and sanitization
//! - Progress, tray and notification signals
//! - Retry with backoff for downloads
//! - Summary and reporting

pub mod coordinator;
pub mod paths;
pub mod progress;
pub mod retry;
pub mod summary;

pub use coordinator::{ExportCoordinator, ExportHandle};
pub use progress::{ExportNotification, ExportPhase, ExportProgress, ProgressCallback, TrayStatus};
pub use summary::{ExportError, ExportErrorType, ExportOutcome, ExportSummary};
