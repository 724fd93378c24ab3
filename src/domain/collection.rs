//! Collection (album) model

use crate::domain::ids::CollectionId;
use serde::{Deserialize, Serialize};

/// Kind of a real collection as stored in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionType {
    /// A user-created album
    #[default]
    Album,
    /// A collection mirroring a device folder
    Folder,
    /// The user's favorites
    Favorites,
    /// Files not placed in any album
    Uncategorized,
}

/// A named grouping of files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Collection identifier
    pub id: CollectionId,

    /// Display name
    pub name: String,

    /// Collection kind
    #[serde(default, rename = "type")]
    pub collection_type: CollectionType,

    /// Last update time in epoch microseconds
    #[serde(default)]
    pub updation_time: Option<i64>,
}

impl Collection {
    /// Creates a new album
    pub fn new(id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            collection_type: CollectionType::Album,
            updation_time: None,
        }
    }

    /// Sets the collection kind
    pub fn with_type(mut self, collection_type: CollectionType) -> Self {
        self.collection_type = collection_type;
        self
    }

    /// Sets the update time
    pub fn with_updation_time(mut self, micros: i64) -> Self {
        self.updation_time = Some(micros);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_defaults_to_album() {
        let collection: Collection =
            serde_json::from_str(r#"{"id": 42, "name": "My Trip/2023"}"#).unwrap();

        assert_eq!(collection.id, CollectionId::new(42));
        assert_eq!(collection.collection_type, CollectionType::Album);
        assert!(collection.updation_time.is_none());
    }

    #[test]
    fn test_collection_type_names() {
        let collection: Collection =
            serde_json::from_str(r#"{"id": 1, "name": "Favs", "type": "favorites"}"#).unwrap();
        assert_eq!(collection.collection_type, CollectionType::Favorites);
    }
}
