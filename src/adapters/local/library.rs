//! Library snapshot backed by a JSON file

use crate::adapters::traits::Library;
use crate::domain::{Collection, File, Result, ShutterError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
struct LibrarySnapshot {
    #[serde(default)]
    files: Vec<File>,
    #[serde(default)]
    collections: Vec<Collection>,
}

/// Library read from `{ "files": [...], "collections": [...] }`
///
/// The snapshot is re-read on every call so an export always sees the
/// library as it is on disk when the run starts.
pub struct JsonLibrary {
    path: PathBuf,
}

impl JsonLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<LibrarySnapshot> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ShutterError::Library(format!(
                "Failed to read library snapshot {}: {e}",
                self.path.display()
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            ShutterError::Library(format!(
                "Malformed library snapshot {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl Library for JsonLibrary {
    async fn get_local_files(&self) -> Result<Vec<File>> {
        let files = self.load().await?.files;
        tracing::debug!(count = files.len(), "Loaded library files");
        Ok(files)
    }

    async fn get_local_collections(&self) -> Result<Vec<Collection>> {
        let collections = self.load().await?.collections;
        tracing::debug!(count = collections.len(), "Loaded library collections");
        Ok(collections)
    }
}
