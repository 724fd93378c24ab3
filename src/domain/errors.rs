//! Domain error types
//!
//! This module defines the error hierarchy for Shutter.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Shutter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ShutterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Library (file and collection listing) errors
    #[error("Library error: {0}")]
    Library(String),

    /// Download transport errors
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// File-system bridge errors
    #[error("Export bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Persisted settings errors
    #[error("Settings error: {0}")]
    Settings(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ShutterError {
    /// Whether the failure is worth retrying.
    ///
    /// Only transport-level hiccups qualify; a 404 or a bad token will not
    /// improve on a second attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ShutterError::Download(e) => e.is_transient(),
            ShutterError::Io(_) => true,
            _ => false,
        }
    }
}

/// Download transport errors
///
/// Errors that occur while fetching file bytes from the remote store.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Failed to connect to the file server
    #[error("Failed to connect to file server: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// File not found on the server
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after: {0}")]
    RateLimitExceeded(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Body stream broke off mid-transfer
    #[error("Download stream interrupted: {0}")]
    StreamInterrupted(String),

    /// The file carries no usable content reference
    #[error("No content reference for file: {0}")]
    MissingContent(String),
}

impl DownloadError {
    /// Whether a retry has a chance of succeeding
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DownloadError::ConnectionFailed(_)
                | DownloadError::RateLimitExceeded(_)
                | DownloadError::ServerError { .. }
                | DownloadError::Timeout(_)
                | DownloadError::StreamInterrupted(_)
        )
    }
}

/// File-system bridge errors
///
/// Errors raised by the host side that owns directories, the export ledger
/// and on-disk writes.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Root directory selection failed
    #[error("Directory selection failed: {0}")]
    SelectionFailed(String),

    /// Failed to create a collection directory
    #[error("Failed to create directory: {0}")]
    DirectoryCreationFailed(String),

    /// Failed to write a file or sidecar
    #[error("Failed to write file: {0}")]
    WriteFailed(String),

    /// Failed to read the export ledger
    #[error("Failed to read export record: {0}")]
    RecordReadFailed(String),

    /// Failed to update the export ledger
    #[error("Failed to update export record: {0}")]
    RecordWriteFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ShutterError {
    fn from(err: std::io::Error) -> Self {
        ShutterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ShutterError {
    fn from(err: serde_json::Error) -> Self {
        ShutterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ShutterError {
    fn from(err: toml::de::Error) -> Self {
        ShutterError::Configuration(format!("TOML parse error: {err}"))
    }
}
