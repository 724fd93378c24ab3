//! File-system bridge over the local disk
//!
//! Writes go through a `.part` sibling that is fsynced and renamed into
//! place, so a file that exists under its final name is complete. The ledger
//! lives in each destination directory as [`EXPORT_RECORD_FILE`].

use crate::adapters::local::{temp_path, write_atomic};
use crate::adapters::traits::{ByteStream, ExportBridge, Listener};
use crate::core::export::progress::{ExportNotification, TrayStatus};
use crate::core::state::{ExportRecord, EXPORT_RECORD_FILE};
use crate::domain::{BridgeError, Result, ShutterError};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::io::AsyncWriteExt;

type SharedListener = Arc<dyn Fn() + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bridge to the local file system
///
/// Directory "selection" returns the configured root. Tray and notification
/// output goes to the log; the latest tray status is kept for inspection.
pub struct LocalExportBridge {
    root: Option<PathBuf>,
    record_lock: tokio::sync::Mutex<()>,
    tray: Mutex<Option<TrayStatus>>,
    stop_listener: Mutex<Option<SharedListener>>,
    retry_listener: Mutex<Option<SharedListener>>,
}

impl LocalExportBridge {
    /// Create a bridge that selects `root` as the destination
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            record_lock: tokio::sync::Mutex::new(()),
            tray: Mutex::new(None),
            stop_listener: Mutex::new(None),
            retry_listener: Mutex::new(None),
        }
    }

    /// Current tray status, if any
    pub fn tray_status(&self) -> Option<TrayStatus> {
        lock(&self.tray).clone()
    }

    /// Ask the running export to stop
    ///
    /// Returns `false` when no stop listener has been registered.
    pub fn request_stop(&self) -> bool {
        let listener = lock(&self.stop_listener).clone();
        match listener {
            Some(listener) => {
                listener();
                true
            }
            None => false,
        }
    }

    /// Ask for the failed files of the last export to be retried
    ///
    /// Returns `false` when no retry has been offered.
    pub fn request_retry(&self) -> bool {
        let listener = lock(&self.retry_listener).clone();
        match listener {
            Some(listener) => {
                listener();
                true
            }
            None => false,
        }
    }

    /// Read the ledger of `dir`
    pub async fn read_export_record(&self, dir: &Path) -> Result<ExportRecord> {
        let path = dir.join(EXPORT_RECORD_FILE);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ExportRecord::default())
            }
            Err(e) => {
                return Err(BridgeError::RecordReadFailed(format!("{}: {e}", path.display())).into())
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            BridgeError::RecordReadFailed(format!("{}: {e}", path.display())).into()
        })
    }

    async fn write_stream(path: &Path, mut stream: ByteStream) -> Result<()> {
        let mut file = tokio::fs::File::create(path).await.map_err(write_failed(path))?;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(write_failed(path))?;
        }

        file.sync_all().await.map_err(write_failed(path))
    }
}

fn write_failed(path: &Path) -> impl Fn(std::io::Error) -> ShutterError + '_ {
    move |e| ShutterError::from(BridgeError::WriteFailed(format!("{}: {e}", path.display())))
}

#[async_trait]
impl ExportBridge for LocalExportBridge {
    async fn select_root_directory(&self) -> Result<Option<PathBuf>> {
        let Some(root) = &self.root else {
            tracing::info!("No export directory configured");
            return Ok(None);
        };

        tokio::fs::create_dir_all(root).await.map_err(|e| {
            BridgeError::SelectionFailed(format!("{}: {e}", root.display()))
        })?;

        let root = tokio::fs::canonicalize(root).await.map_err(|e| {
            BridgeError::SelectionFailed(format!("{}: {e}", root.display()))
        })?;
        tracing::info!(root = %root.display(), "Export directory selected");
        Ok(Some(root))
    }

    async fn check_exists_and_create_collection_dir(&self, dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            BridgeError::DirectoryCreationFailed(format!("{}: {e}", dir.display())).into()
        })
    }

    async fn get_exported_files(&self, dir: &Path) -> Result<BTreeSet<String>> {
        Ok(self.read_export_record(dir).await?.exported_files)
    }

    async fn update_export_record(&self, dir: &Path, relative_path: &str) -> Result<()> {
        let _guard = self.record_lock.lock().await;

        let mut record = self.read_export_record(dir).await?;
        if !record.record(relative_path) {
            return Ok(());
        }

        let path = dir.join(EXPORT_RECORD_FILE);
        let contents = serde_json::to_vec_pretty(&record)?;
        write_atomic(&path, &contents).await.map_err(|e| {
            BridgeError::RecordWriteFailed(format!("{}: {e}", path.display())).into()
        })
    }

    async fn save_stream_to_disk(&self, path: &Path, stream: ByteStream) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_failed(parent))?;
        }

        let temp = temp_path(path);
        if let Err(e) = Self::write_stream(&temp, stream).await {
            // Leftover partial content is discarded; the next attempt starts over
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e);
        }

        tokio::fs::rename(&temp, path)
            .await
            .map_err(write_failed(path))
    }

    async fn save_file_to_disk(&self, path: &Path, contents: &str) -> Result<()> {
        write_atomic(path, contents.as_bytes())
            .await
            .map_err(write_failed(path))
    }

    fn show_on_tray(&self, status: Option<TrayStatus>) {
        match &status {
            Some(status) => tracing::debug!(tray = %status, "Tray updated"),
            None => tracing::debug!("Tray cleared"),
        }
        *lock(&self.tray) = status;
    }

    fn send_notification(&self, notification: ExportNotification) {
        match notification {
            ExportNotification::Failed | ExportNotification::Abort => {
                tracing::warn!(notification = %notification, "Export notification")
            }
            _ => tracing::info!(notification = %notification, "Export notification"),
        }
    }

    fn register_stop_export_listener(&self, listener: Listener) {
        *lock(&self.stop_listener) = Some(Arc::from(listener));
    }

    fn register_retry_failed_export_listener(&self, listener: Listener) {
        *lock(&self.retry_listener) = Some(Arc::from(listener));
    }
}
