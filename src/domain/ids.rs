//! Domain identifier types with validation
//!
//! Newtype wrappers for library identifiers. Files and collections are both
//! keyed by integers on the wire; the wrappers keep the two from being mixed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use shutter::domain::ids::FileId;
/// use std::str::FromStr;
///
/// let id = FileId::from_str("7").unwrap();
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(i64);

impl FileId {
    /// Creates a new FileId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid file ID '{s}': {e}"))
    }
}

impl From<i64> for FileId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Collection identifier newtype wrapper
///
/// Real collections have positive identifiers; pseudo collections shown in
/// the UI (such as "all") use zero or negative ones.
///
/// # Examples
///
/// ```
/// use shutter::domain::ids::CollectionId;
/// use std::str::FromStr;
///
/// let id = CollectionId::from_str("42").unwrap();
/// assert_eq!(id.value(), 42);
/// assert!(!id.is_pseudo());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(i64);

impl CollectionId {
    /// Identifier of the pseudo "all" section
    pub const ALL_SECTION: CollectionId = CollectionId(0);

    /// Creates a new CollectionId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this identifies a UI-only pseudo collection
    pub fn is_pseudo(&self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid collection ID '{s}': {e}"))
    }
}

impl From<i64> for CollectionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_parse() {
        let id = FileId::from_str(" 1234 ").unwrap();
        assert_eq!(id.value(), 1234);
        assert!(FileId::from_str("abc").is_err());
        assert!(FileId::from_str("").is_err());
    }

    #[test]
    fn test_collection_id_pseudo() {
        assert!(CollectionId::ALL_SECTION.is_pseudo());
        assert!(CollectionId::new(-1).is_pseudo());
        assert!(!CollectionId::new(42).is_pseudo());
    }

    #[test]
    fn test_ids_serialize_as_numbers() {
        let json = serde_json::to_string(&FileId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: CollectionId = serde_json::from_str("42").unwrap();
        assert_eq!(id, CollectionId::new(42));
    }
}
