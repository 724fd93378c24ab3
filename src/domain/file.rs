//! Library file model
//!
//! A `File` is a single photo or video as listed by the local library cache.
//! Files are immutable for the duration of an export run.

use crate::domain::ids::{CollectionId, FileId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata attached to a file
///
/// Only `title` is required. Fields the exporter does not interpret are kept
/// in `extra` so the metadata sidecar written next to each exported file
/// carries everything the library knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Display title (usually the original file name)
    pub title: String,

    /// Capture time in epoch microseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,

    /// Last modification time in epoch microseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<i64>,

    /// Any additional metadata, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileMetadata {
    /// Creates metadata with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            creation_time: None,
            modification_time: None,
            extra: Map::new(),
        }
    }

    /// Sets the creation time
    pub fn with_creation_time(mut self, micros: i64) -> Self {
        self.creation_time = Some(micros);
        self
    }

    /// Pretty-printed JSON used for the metadata sidecar
    pub fn to_sidecar_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A file in the user's library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// File identifier
    pub id: FileId,

    /// Owning collection
    #[serde(rename = "collectionID", alias = "collectionId")]
    pub collection_id: CollectionId,

    /// File metadata
    pub metadata: FileMetadata,

    /// Explicit content location, if the library knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl File {
    /// Creates a new file
    pub fn new(id: FileId, collection_id: CollectionId, metadata: FileMetadata) -> Self {
        Self {
            id,
            collection_id,
            metadata,
            download_url: None,
        }
    }

    /// The display title
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Creation time, treating unknown as the epoch
    pub fn creation_time(&self) -> i64 {
        self.metadata.creation_time.unwrap_or(0)
    }
}
