//! Key/value settings store backed by a JSON object file

use crate::adapters::local::write_atomic;
use crate::adapters::traits::SettingsStore;
use crate::domain::{Result, ShutterError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Settings persisted as one JSON object, one entry per key
///
/// Writes replace the whole file atomically and are serialized by an async
/// mutex, so a `set` never interleaves with another `set` from this process.
pub struct JsonSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(ShutterError::Settings(format!(
                    "Failed to read settings {}: {e}",
                    self.path.display()
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            ShutterError::Settings(format!(
                "Malformed settings file {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value);

        let contents = serde_json::to_vec_pretty(&values)?;
        write_atomic(&self.path, &contents).await.map_err(|e| {
            ShutterError::Settings(format!(
                "Failed to write settings {}: {e}",
                self.path.display()
            ))
        })
    }
}
