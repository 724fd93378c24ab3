//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use shutter::logging::init_logging;
//! use shutter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use shutter::log_export_start;
///
/// let run_id = uuid::Uuid::new_v4();
/// log_export_start!(run_id, 120);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($run_id:expr, $total:expr) => {
        tracing::info!(
            run_id = %$run_id,
            total_files = $total,
            "Starting export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use shutter::log_export_complete;
/// use std::time::Duration;
///
/// let count = 42;
/// let duration = Duration::from_secs(10);
/// log_export_complete!(count, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use shutter::log_error_with_context;
/// use shutter::domain::ShutterError;
///
/// let error = ShutterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log per-file progress
///
/// # Example
///
/// ```no_run
/// use shutter::log_file_progress;
///
/// log_file_progress!(10, 100);
/// ```
#[macro_export]
macro_rules! log_file_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = if $total == 0 {
                100.0
            } else {
                $current as f64 / $total as f64 * 100.0
            },
            "Export progress"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use shutter::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "download_file", "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $operation:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            operation = $operation,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
