//! Destination path derivation
//!
//! Every collection maps to one folder under the export root and every file
//! to one path inside its collection's folder. Both are derived purely from
//! ids and names, so re-running an export lands on the same paths and the
//! ledger can recognise work that is already done.

use crate::domain::{Collection, File};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Characters that may not appear in a derived name
const REPLACED_CHARS: [char; 3] = [' ', '/', '\\'];

/// Replaces spaces and path separators with underscores.
///
/// Total and idempotent: the output never contains a replaced character, so
/// a second pass changes nothing.
///
/// ```
/// use shutter::core::export::paths::sanitize_name;
///
/// assert_eq!(sanitize_name("My Trip/2023"), "My_Trip_2023");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if REPLACED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Folder name for a collection: `<id>_<sanitized name>`
pub fn collection_folder_name(collection: &Collection) -> String {
    format!("{}_{}", collection.id, sanitize_name(&collection.name))
}

/// Ledger-relative path of a file: `<folder>/<id>_<sanitized title>`
pub fn file_relative_path(collection_folder: &str, file: &File) -> String {
    format!(
        "{}/{}_{}",
        collection_folder,
        file.id,
        sanitize_name(file.title())
    )
}

/// Path of the metadata sidecar written next to an exported file
pub fn metadata_path(destination: &Path) -> PathBuf {
    let mut path: OsString = destination.as_os_str().to_owned();
    path.push(".json");
    PathBuf::from(path)
}
