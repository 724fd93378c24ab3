//! Export coordinator - orchestrates export runs
//!
//! One coordinator exists per process and is shared by `Arc`. It owns the
//! single in-flight slot, the abort signal and the retry offer left behind by
//! a run with failures. Each run is spawned onto the runtime and processes
//! files strictly one at a time, in input order.

use crate::adapters::traits::{Downloader, ExportBridge, Library, SettingsStore};
use crate::config::schema::RetryConfig;
use crate::core::export::paths::{collection_folder_name, file_relative_path, metadata_path};
use crate::core::export::progress::{
    ExportNotification, ExportPhase, ExportProgress, ProgressCallback, TrayStatus,
};
use crate::core::export::retry::retry_with_backoff;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportOutcome, ExportSummary};
use crate::core::state::SettingsManager;
use crate::domain::{Collection, CollectionId, File, Result, ShutterError};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};
use std::time::Instant;
use tokio::sync::watch;
use uuid::Uuid;

/// Handle to a pending export run
///
/// Cloneable; every clone resolves to the same [`ExportSummary`]. The run
/// makes progress whether or not the handle is polled.
#[derive(Clone)]
pub struct ExportHandle {
    run_id: Uuid,
    inner: Shared<BoxFuture<'static, ExportSummary>>,
}

impl ExportHandle {
    fn ready(summary: ExportSummary) -> Self {
        Self {
            run_id: summary.run_id,
            inner: futures::future::ready(summary).boxed().shared(),
        }
    }

    /// Identifier of the run this handle belongs to
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Whether both handles refer to the same run
    pub fn is_same_run(&self, other: &ExportHandle) -> bool {
        self.run_id == other.run_id
    }
}

impl Future for ExportHandle {
    type Output = ExportSummary;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl std::fmt::Debug for ExportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportHandle")
            .field("run_id", &self.run_id)
            .finish_non_exhaustive()
    }
}

struct InFlightExport {
    run_id: Uuid,
    handle: ExportHandle,
}

/// Failed subset of the last run, kept for the retry entry point
struct PendingRetry {
    files: Vec<File>,
    collections: Vec<Collection>,
    progress: Option<ProgressCallback>,
}

/// Export coordinator
pub struct ExportCoordinator {
    weak_self: Weak<ExportCoordinator>,
    library: Arc<dyn Library>,
    bridge: Arc<dyn ExportBridge>,
    downloader: Arc<dyn Downloader>,
    settings: SettingsManager,
    retry_config: RetryConfig,
    in_flight: Mutex<Option<InFlightExport>>,
    pending_retry: Mutex<Option<PendingRetry>>,
    abort_tx: watch::Sender<bool>,
    phase_tx: watch::Sender<ExportPhase>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(
        library: Arc<dyn Library>,
        bridge: Arc<dyn ExportBridge>,
        downloader: Arc<dyn Downloader>,
        settings_store: Arc<dyn SettingsStore>,
        retry_config: RetryConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            weak_self: weak_self.clone(),
            library,
            bridge,
            downloader,
            settings: SettingsManager::new(settings_store),
            retry_config,
            in_flight: Mutex::new(None),
            pending_retry: Mutex::new(None),
            abort_tx: watch::channel(false).0,
            phase_tx: watch::channel(ExportPhase::Idle).0,
        })
    }

    /// Typed access to the persisted export settings
    pub fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ExportPhase {
        *self.phase_tx.borrow()
    }

    /// Subscribe to phase changes
    pub fn subscribe_phase(&self) -> watch::Receiver<ExportPhase> {
        self.phase_tx.subscribe()
    }

    /// Whether a run currently occupies the in-flight slot
    pub fn is_export_in_progress(&self) -> bool {
        lock(&self.in_flight).is_some()
    }

    /// Whether the last run left failed files to retry
    pub fn has_pending_retry(&self) -> bool {
        lock(&self.pending_retry).is_some()
    }

    /// Export every file in the library
    ///
    /// Loads files and collections, then either joins the run already in
    /// flight (sending [`ExportNotification::InProgress`]) or starts a new
    /// one. Never fails: a library that cannot be read yields a handle that
    /// resolves to an [`ExportOutcome::Errored`] summary.
    pub async fn export_files(&self, progress: Option<ProgressCallback>) -> ExportHandle {
        match self.load_library().await {
            Ok((files, collections)) => self.start_run(files, collections, progress),
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load library for export");
                let joined = self.join_in_flight(&lock(&self.in_flight));
                joined.unwrap_or_else(|| {
                    ExportHandle::ready(ExportSummary::errored(Uuid::new_v4(), e.to_string()))
                })
            }
        }
    }

    /// Run the export loop over the given files
    ///
    /// Goes through the same single-flight slot as [`Self::export_files`], so
    /// a call made while another run is in flight resolves to that run's
    /// summary.
    pub async fn file_exporter(
        &self,
        files: Vec<File>,
        collections: Vec<Collection>,
        progress: Option<ProgressCallback>,
    ) -> ExportSummary {
        self.start_run(files, collections, progress).await
    }

    /// Re-run the failed files of the last run
    ///
    /// Returns `None` when there is nothing to retry.
    pub fn retry_failed_export(&self) -> Option<ExportHandle> {
        // The slot stays locked until the retry run occupies it
        let slot = lock(&self.in_flight);
        if let Some(handle) = self.join_in_flight(&slot) {
            return Some(handle);
        }

        let pending = lock(&self.pending_retry).take()?;
        tracing::info!(
            file_count = pending.files.len(),
            "Retrying failed export"
        );
        Some(self.spawn_run(slot, pending.files, pending.collections, pending.progress))
    }

    /// Resume an export that was active when the process last stopped
    ///
    /// `progress` also stays attached to any retry offered by the resumed run.
    pub async fn resume_if_active(
        &self,
        progress: Option<ProgressCallback>,
    ) -> Result<Option<ExportHandle>> {
        let settings = self.settings.load_export_settings().await?;
        if !(settings.status && settings.has_destination()) {
            return Ok(None);
        }

        tracing::info!("Resuming interrupted export");
        Ok(Some(self.export_files(progress).await))
    }

    /// Request a stop of the running export
    ///
    /// Observed before the next file; a download already under way completes.
    /// Has no effect when nothing is running.
    pub fn cancel_export(&self) {
        if !self.phase().is_active() {
            tracing::debug!("Cancel requested with no export running");
            return;
        }
        tracing::info!("Export cancellation requested");
        self.abort_tx.send_replace(true);
    }

    /// Let the user pick the destination root
    pub async fn select_export_directory(&self) -> Result<Option<PathBuf>> {
        self.bridge.select_root_directory().await
    }

    /// Download one file and write it with its metadata sidecar
    ///
    /// The download and the byte write are retried together on transient
    /// failures.
    ///
    /// # Errors
    ///
    /// Returns the last error when the download, the write or the sidecar
    /// write fails.
    pub async fn download_and_save(&self, file: &File, destination: &Path) -> Result<()> {
        retry_with_backoff(&self.retry_config, "download_file", || async {
            let stream = self.downloader.download_file(file).await?;
            self.bridge.save_stream_to_disk(destination, stream).await
        })
        .await?;

        let metadata = file.metadata.to_sidecar_json()?;
        self.bridge
            .save_file_to_disk(&metadata_path(destination), &metadata)
            .await
    }

    async fn load_library(&self) -> Result<(Vec<File>, Vec<Collection>)> {
        let files = self.library.get_local_files().await?;
        let collections = self.library.get_local_collections().await?;
        Ok((files, collections))
    }

    fn start_run(
        &self,
        files: Vec<File>,
        collections: Vec<Collection>,
        progress: Option<ProgressCallback>,
    ) -> ExportHandle {
        let slot = lock(&self.in_flight);
        match self.join_in_flight(&slot) {
            Some(handle) => handle,
            None => self.spawn_run(slot, files, collections, progress),
        }
    }

    fn join_in_flight(&self, slot: &Option<InFlightExport>) -> Option<ExportHandle> {
        let in_flight = slot.as_ref()?;
        tracing::info!(run_id = %in_flight.run_id, "Export already in progress");
        self.bridge.send_notification(ExportNotification::InProgress);
        Some(in_flight.handle.clone())
    }

    /// Start a run in the empty slot held by `slot`
    fn spawn_run(
        &self,
        mut slot: MutexGuard<'_, Option<InFlightExport>>,
        files: Vec<File>,
        collections: Vec<Collection>,
        progress: Option<ProgressCallback>,
    ) -> ExportHandle {
        let run_id = Uuid::new_v4();
        let Some(this) = self.weak_self.upgrade() else {
            return ExportHandle::ready(ExportSummary::errored(
                run_id,
                "Export coordinator is shutting down",
            ));
        };

        lock(&self.pending_retry).take();
        self.phase_tx.send_replace(ExportPhase::Starting);

        let task = tokio::spawn(this.run_export(run_id, files, collections, progress));
        let inner = async move {
            match task.await {
                Ok(summary) => summary,
                Err(e) => ExportSummary::errored(run_id, format!("Export task failed: {e}")),
            }
        }
        .boxed()
        .shared();

        let handle = ExportHandle { run_id, inner };
        *slot = Some(InFlightExport {
            run_id,
            handle: handle.clone(),
        });
        drop(slot);

        self.bridge.show_on_tray(Some(TrayStatus::Starting));
        let weak = self.weak_self.clone();
        self.bridge
            .register_stop_export_listener(Box::new(move || {
                if let Some(coordinator) = weak.upgrade() {
                    coordinator.cancel_export();
                }
            }));

        handle
    }

    async fn run_export(
        self: Arc<Self>,
        run_id: Uuid,
        files: Vec<File>,
        collections: Vec<Collection>,
        progress: Option<ProgressCallback>,
    ) -> ExportSummary {
        let start_time = Instant::now();

        let result = AssertUnwindSafe(self.export_body(run_id, files, collections, progress))
            .catch_unwind()
            .await;

        let summary = match result {
            Ok(summary) => summary,
            Err(_) => {
                tracing::error!(run_id = %run_id, "Export run panicked");
                ExportSummary::errored(run_id, "Export run panicked")
            }
        };

        self.finish_run(run_id);

        let summary = summary.with_duration(start_time.elapsed());
        crate::log_export_complete!(summary.exported, summary.duration);
        summary
    }

    /// Reset per-run state so a new run can be accepted
    fn finish_run(&self, run_id: Uuid) {
        self.abort_tx.send_replace(false);
        self.phase_tx.send_replace(ExportPhase::Idle);

        let mut slot = lock(&self.in_flight);
        if slot.as_ref().is_some_and(|in_flight| in_flight.run_id == run_id) {
            *slot = None;
        }
    }

    async fn export_body(
        &self,
        run_id: Uuid,
        files: Vec<File>,
        collections: Vec<Collection>,
        progress: Option<ProgressCallback>,
    ) -> ExportSummary {
        let mut summary = ExportSummary::new(run_id, files.len());

        if let Err(e) = self
            .export_all(&mut summary, files, collections, progress)
            .await
        {
            crate::log_error_with_context!(&e, "Export run failed");
            summary.add_error(ExportError::from_error(&e));
            summary.outcome = ExportOutcome::Errored(e.to_string());
        }

        summary
    }

    async fn export_all(
        &self,
        summary: &mut ExportSummary,
        files: Vec<File>,
        collections: Vec<Collection>,
        progress: Option<ProgressCallback>,
    ) -> Result<()> {
        let settings = self.settings.load_export_settings().await?;
        let root = match settings.folder {
            Some(folder) if settings_folder_usable(&folder) => folder,
            _ => {
                tracing::info!("No export directory selected, nothing to export");
                summary.outcome = ExportOutcome::NoDestination;
                return Ok(());
            }
        };

        let mut exported = self.bridge.get_exported_files(&root).await?;
        let total = files.len();

        crate::log_export_start!(summary.run_id, total);
        emit_progress(
            progress.as_ref(),
            ExportProgress {
                current: 0,
                total,
                failed: 0,
            },
        );
        self.bridge.show_on_tray(Some(TrayStatus::Progress {
            processed: 0,
            total,
        }));
        self.bridge.send_notification(ExportNotification::Start);
        self.settings.set_export_status(true).await?;

        let folders = self.prepare_collection_dirs(&root, &collections).await;

        self.phase_tx.send_replace(ExportPhase::Running);
        let mut failed_files: Vec<File> = Vec::new();
        let mut aborted = false;

        for file in &files {
            let abort_requested = *self.abort_tx.borrow();
            if abort_requested {
                tracing::info!(
                    processed = summary.processed,
                    total,
                    "Export aborted"
                );
                aborted = true;
                break;
            }

            match self.export_one(&root, &folders, &exported, file).await {
                Ok(FileOutcome::Skipped) => summary.skipped += 1,
                Ok(FileOutcome::Exported(relative_path)) => {
                    summary.exported += 1;
                    exported.insert(relative_path);
                }
                Err(error) => {
                    tracing::error!(
                        file_id = %file.id,
                        error = %error.message,
                        "Failed to export file"
                    );
                    summary.add_failure(file.id, error);
                    failed_files.push(file.clone());
                }
            }

            summary.processed += 1;
            crate::log_file_progress!(summary.processed, total);
            emit_progress(
                progress.as_ref(),
                ExportProgress {
                    current: summary.processed,
                    total,
                    failed: failed_files.len(),
                },
            );
            self.bridge.show_on_tray(Some(TrayStatus::Progress {
                processed: summary.processed,
                total,
            }));
        }

        let (notification, outcome, phase) = if aborted {
            (
                ExportNotification::Abort,
                ExportOutcome::Aborted,
                ExportPhase::Aborted,
            )
        } else if !failed_files.is_empty() {
            (
                ExportNotification::Failed,
                ExportOutcome::Failed,
                ExportPhase::FailedPartial,
            )
        } else {
            (
                ExportNotification::Finish,
                ExportOutcome::Finished,
                ExportPhase::Finished,
            )
        };
        summary.outcome = outcome;
        self.phase_tx.send_replace(phase);
        self.bridge.send_notification(notification);

        if failed_files.is_empty() {
            self.bridge.show_on_tray(None);
            self.settings.set_export_status(false).await?;
        } else {
            self.offer_retry(failed_files, collections, progress);
        }

        Ok(())
    }

    /// Ensure one folder per collection exists under `root`
    ///
    /// Collections whose folder cannot be created are left out of the map,
    /// so their files fail individually.
    async fn prepare_collection_dirs(
        &self,
        root: &Path,
        collections: &[Collection],
    ) -> HashMap<CollectionId, String> {
        let mut folders = HashMap::with_capacity(collections.len());

        for collection in collections {
            let folder = collection_folder_name(collection);
            match self
                .bridge
                .check_exists_and_create_collection_dir(&root.join(&folder))
                .await
            {
                Ok(()) => {
                    folders.insert(collection.id, folder);
                }
                Err(e) => {
                    tracing::warn!(
                        collection_id = %collection.id,
                        folder = %folder,
                        error = %e,
                        "Failed to create collection directory"
                    );
                }
            }
        }

        folders
    }

    async fn export_one(
        &self,
        root: &Path,
        folders: &HashMap<CollectionId, String>,
        exported: &BTreeSet<String>,
        file: &File,
    ) -> std::result::Result<FileOutcome, ExportError> {
        let folder = folders.get(&file.collection_id).ok_or_else(|| {
            ExportError::new(
                ExportErrorType::MissingCollection,
                format!("No export folder for collection {}", file.collection_id),
            )
        })?;

        let relative_path = file_relative_path(folder, file);
        if exported.contains(&relative_path) {
            tracing::debug!(path = %relative_path, "Already exported, skipping");
            return Ok(FileOutcome::Skipped);
        }

        let with_path = |e: ShutterError| {
            ExportError::from_error(&e).with_context(format!("path={relative_path}"))
        };

        self.download_and_save(file, &root.join(&relative_path))
            .await
            .map_err(with_path)?;
        self.bridge
            .update_export_record(root, &relative_path)
            .await
            .map_err(with_path)?;

        Ok(FileOutcome::Exported(relative_path))
    }

    fn offer_retry(
        &self,
        files: Vec<File>,
        collections: Vec<Collection>,
        progress: Option<ProgressCallback>,
    ) {
        tracing::warn!(failed = files.len(), "Export finished with failures");

        *lock(&self.pending_retry) = Some(PendingRetry {
            files,
            collections,
            progress,
        });

        let weak = self.weak_self.clone();
        self.bridge
            .register_retry_failed_export_listener(Box::new(move || {
                if let Some(coordinator) = weak.upgrade() {
                    coordinator.retry_failed_export();
                }
            }));
        self.bridge.show_on_tray(Some(TrayStatus::RetryAvailable));
    }
}

enum FileOutcome {
    Skipped,
    Exported(String),
}

fn settings_folder_usable(folder: &Path) -> bool {
    !folder.as_os_str().is_empty()
}

fn emit_progress(progress: Option<&ProgressCallback>, snapshot: ExportProgress) {
    if let Some(callback) = progress {
        callback(snapshot);
    }
}
