//! Shared fixtures for the export integration tests
//!
//! The library, settings store and downloader are in memory. The bridge is
//! the real [`LocalExportBridge`] over a temporary directory, wrapped so that
//! notifications can be inspected.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::StreamExt;
use shutter::adapters::local::LocalExportBridge;
use shutter::adapters::{ByteStream, Downloader, ExportBridge, Library, Listener, SettingsStore};
use shutter::config::RetryConfig;
use shutter::core::export::{ExportCoordinator, ExportNotification, TrayStatus};
use shutter::domain::{
    Collection, CollectionId, DownloadError, File, FileId, FileMetadata, Result,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::Semaphore;

pub struct StaticLibrary {
    pub files: Vec<File>,
    pub collections: Vec<Collection>,
}

#[async_trait]
impl Library for StaticLibrary {
    async fn get_local_files(&self) -> Result<Vec<File>> {
        Ok(self.files.clone())
    }

    async fn get_local_collections(&self) -> Result<Vec<Collection>> {
        Ok(self.collections.clone())
    }
}

#[derive(Default)]
pub struct MemorySettings {
    values: tokio::sync::Mutex<HashMap<String, serde_json::Value>>,
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// How a flaky file misbehaves before it starts working
#[derive(Debug, Clone, Copy)]
pub enum Glitch {
    /// The request times out before any byte arrives
    Timeout,
    /// Part of the body arrives, then the connection drops
    Interrupted,
}

/// Serves `content of <id>` for every file except the ones marked failing
///
/// Flaky files glitch a set number of times before serving their content.
/// With a gate, each download waits for one permit before answering.
#[derive(Default)]
pub struct ScriptedDownloader {
    failing: Mutex<HashSet<FileId>>,
    flaky: Mutex<HashMap<FileId, (Glitch, usize)>>,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedDownloader {
    pub fn failing(ids: &[i64]) -> Self {
        Self {
            failing: Mutex::new(ids.iter().copied().map(FileId::new).collect()),
            ..Self::default()
        }
    }

    /// `id` glitches `times` times, then downloads normally
    pub fn flaky(id: i64, glitch: Glitch, times: usize) -> Self {
        Self {
            flaky: Mutex::new(HashMap::from([(FileId::new(id), (glitch, times))])),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn fail(&self, id: i64) {
        self.failing.lock().unwrap().insert(FileId::new(id));
    }

    pub fn heal(&self, id: i64) {
        self.failing.lock().unwrap().remove(&FileId::new(id));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn content_of(id: i64) -> String {
    format!("content of {id}")
}

#[async_trait]
impl Downloader for ScriptedDownloader {
    async fn download_file(&self, file: &File) -> Result<ByteStream> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(&file.id) {
            return Err(DownloadError::FileNotFound(file.id.to_string()).into());
        }
        let bytes = content_of(file.id.value()).into_bytes();

        let glitch = match self.flaky.lock().unwrap().get_mut(&file.id) {
            Some((glitch, remaining)) if *remaining > 0 => {
                *remaining -= 1;
                Some(*glitch)
            }
            _ => None,
        };
        match glitch {
            None => Ok(futures::stream::iter(vec![Ok(bytes)]).boxed()),
            Some(Glitch::Timeout) => {
                Err(DownloadError::Timeout(format!("file {}", file.id)).into())
            }
            Some(Glitch::Interrupted) => {
                let partial = bytes[..bytes.len() / 2].to_vec();
                let dropped: Result<Vec<u8>> =
                    Err(DownloadError::StreamInterrupted("connection reset".to_string()).into());
                Ok(futures::stream::iter(vec![Ok(partial), dropped]).boxed())
            }
        }
    }
}

/// Local bridge that also records every notification
pub struct RecordingBridge {
    pub inner: LocalExportBridge,
    notifications: Mutex<Vec<ExportNotification>>,
}

impl RecordingBridge {
    pub fn new(root: PathBuf) -> Self {
        Self {
            inner: LocalExportBridge::new(Some(root)),
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn notifications(&self) -> Vec<ExportNotification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn count(&self, notification: ExportNotification) -> usize {
        self.notifications()
            .into_iter()
            .filter(|n| *n == notification)
            .count()
    }
}

#[async_trait]
impl ExportBridge for RecordingBridge {
    async fn select_root_directory(&self) -> Result<Option<PathBuf>> {
        self.inner.select_root_directory().await
    }

    async fn check_exists_and_create_collection_dir(&self, dir: &Path) -> Result<()> {
        self.inner.check_exists_and_create_collection_dir(dir).await
    }

    async fn get_exported_files(&self, dir: &Path) -> Result<BTreeSet<String>> {
        self.inner.get_exported_files(dir).await
    }

    async fn update_export_record(&self, dir: &Path, relative_path: &str) -> Result<()> {
        self.inner.update_export_record(dir, relative_path).await
    }

    async fn save_stream_to_disk(&self, path: &Path, stream: ByteStream) -> Result<()> {
        self.inner.save_stream_to_disk(path, stream).await
    }

    async fn save_file_to_disk(&self, path: &Path, contents: &str) -> Result<()> {
        self.inner.save_file_to_disk(path, contents).await
    }

    fn show_on_tray(&self, status: Option<TrayStatus>) {
        self.inner.show_on_tray(status)
    }

    fn send_notification(&self, notification: ExportNotification) {
        self.notifications.lock().unwrap().push(notification);
        self.inner.send_notification(notification)
    }

    fn register_stop_export_listener(&self, listener: Listener) {
        self.inner.register_stop_export_listener(listener)
    }

    fn register_retry_failed_export_listener(&self, listener: Listener) {
        self.inner.register_retry_failed_export_listener(listener)
    }
}

pub fn trip() -> Collection {
    Collection::new(CollectionId::new(42), "Summer Trip")
}

pub fn photo(id: i64, title: &str) -> File {
    File::new(
        FileId::new(id),
        CollectionId::new(42),
        FileMetadata::new(title).with_creation_time(1_700_000_000_000_000 + id),
    )
}

/// Three photos in one collection
pub fn three_photos() -> Vec<File> {
    vec![
        photo(1, "a.jpg"),
        photo(2, "b.jpg"),
        photo(3, "c.jpg"),
    ]
}

pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 2,
        initial_delay_ms: 1,
        max_delay_ms: 5,
        backoff_multiplier: 2.0,
    }
}

pub struct Harness {
    pub dir: TempDir,
    pub root: PathBuf,
    pub bridge: Arc<RecordingBridge>,
    pub downloader: Arc<ScriptedDownloader>,
    pub settings: Arc<MemorySettings>,
    pub coordinator: Arc<ExportCoordinator>,
}

impl Harness {
    /// Coordinator over `files` with the destination already selected
    pub async fn new(files: Vec<File>, downloader: ScriptedDownloader) -> Self {
        Self::with_library(files, vec![trip()], downloader).await
    }

    pub async fn with_library(
        files: Vec<File>,
        collections: Vec<Collection>,
        downloader: ScriptedDownloader,
    ) -> Self {
        let dir = TempDir::new().unwrap();
        let bridge = Arc::new(RecordingBridge::new(dir.path().join("export")));
        let downloader = Arc::new(downloader);
        let settings = Arc::new(MemorySettings::default());

        let coordinator = ExportCoordinator::new(
            Arc::new(StaticLibrary { files, collections }),
            bridge.clone(),
            downloader.clone(),
            settings.clone(),
            fast_retry(),
        );

        let root = coordinator
            .select_export_directory()
            .await
            .unwrap()
            .unwrap();
        coordinator
            .settings()
            .set_export_folder(root.clone())
            .await
            .unwrap();

        Self {
            dir,
            root,
            bridge,
            downloader,
            settings,
            coordinator,
        }
    }

    /// Ledger entries on disk
    pub async fn ledger(&self) -> BTreeSet<String> {
        self.bridge.inner.get_exported_files(&self.root).await.unwrap()
    }

    pub fn exported_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}
