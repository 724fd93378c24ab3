//! Local collaborator implementations
//!
//! - [`JsonLibrary`] - library snapshot read from a JSON file
//! - [`JsonSettingsStore`] - key/value settings in a JSON file
//! - [`LocalExportBridge`] - file-system bridge over `tokio::fs`

pub mod bridge;
pub mod library;
pub mod settings;

pub use bridge::LocalExportBridge;
pub use library::JsonLibrary;
pub use settings::JsonSettingsStore;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Sibling path used while a file is being written
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut temp: OsString = path.as_os_str().to_owned();
    temp.push(".part");
    PathBuf::from(temp)
}

/// Write `contents` to `path` through a temp file and a rename
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let temp = temp_path(path);
    let mut file = tokio::fs::File::create(&temp).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&temp, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/a/b/7_photo.jpg")),
            PathBuf::from("/a/b/7_photo.jpg.part")
        );
    }

    #[tokio::test]
    async fn test_write_atomic_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("file.txt");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "second");
        assert!(!temp_path(&path).exists());
    }
}
