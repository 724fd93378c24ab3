//! Collaborator traits
//!
//! The export orchestrator drives four external collaborators: the local
//! library listing, a key/value settings store, the host file-system bridge
//! and the download transport. Each one is a trait so the orchestrator can be
//! exercised against in-memory implementations.

use crate::core::export::progress::{ExportNotification, TrayStatus};
use crate::domain::{Collection, File, Result};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Chunks of file content as they arrive from the transport
pub type ByteStream = BoxStream<'static, Result<Vec<u8>>>;

/// Callback registered with the bridge for host-initiated events
pub type Listener = Box<dyn Fn() + Send + Sync>;

/// Source of the user's files and collections
#[async_trait]
pub trait Library: Send + Sync {
    /// Every file known to the local library, in export order
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be read.
    async fn get_local_files(&self) -> Result<Vec<File>>;

    /// Every collection known to the local library
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be read.
    async fn get_local_collections(&self) -> Result<Vec<Collection>>;
}

/// Persistent key/value settings storage
///
/// Reads and writes of a single key are atomic.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// Host file-system bridge
///
/// Owns directory selection, on-disk writes, the per-directory export ledger
/// and the user-facing tray and notification surfaces.
#[async_trait]
pub trait ExportBridge: Send + Sync {
    /// Let the user pick a root directory; `None` when they cancel
    async fn select_root_directory(&self) -> Result<Option<PathBuf>>;

    /// Create `dir` if it does not exist yet
    async fn check_exists_and_create_collection_dir(&self, dir: &Path) -> Result<()>;

    /// Relative paths already exported into `dir`
    async fn get_exported_files(&self, dir: &Path) -> Result<BTreeSet<String>>;

    /// Add `relative_path` to the ledger of `dir`
    async fn update_export_record(&self, dir: &Path, relative_path: &str) -> Result<()>;

    /// Write a byte stream to `path`
    async fn save_stream_to_disk(&self, path: &Path, stream: ByteStream) -> Result<()>;

    /// Write text to `path`
    async fn save_file_to_disk(&self, path: &Path, contents: &str) -> Result<()>;

    /// Show a status line in the tray, or clear it with `None`
    fn show_on_tray(&self, status: Option<TrayStatus>);

    /// Surface a notification to the user
    fn send_notification(&self, notification: ExportNotification);

    /// Called when the host asks for the running export to stop
    fn register_stop_export_listener(&self, listener: Listener);

    /// Called when the user asks to retry the failed files of the last run
    fn register_retry_failed_export_listener(&self, listener: Listener);
}

/// Download transport
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Open a stream over the content of `file`
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::DownloadError`] wrapped in
    /// [`crate::domain::ShutterError::Download`] when the request fails.
    async fn download_file(&self, file: &File) -> Result<ByteStream>;
}
