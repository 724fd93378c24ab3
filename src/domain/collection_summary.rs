//! Collection summaries for display
//!
//! A [`CollectionSummary`] is a massaged version of a real or pseudo
//! collection, ready to be rendered directly in a list of albums. This module
//! holds the taxonomy of summary kinds, the fixed category ordering, and the
//! sort schemes applied within each category.

use crate::domain::collection::{Collection, CollectionType};
use crate::domain::file::File;
use crate::domain::ids::CollectionId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The "UI" type of a collection summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionSummaryType {
    Folder,
    Favorites,
    Album,
    Archive,
    Trash,
    Uncategorized,
    All,
    OutgoingShare,
    IncomingShareViewer,
    IncomingShareCollaborator,
    SharedOnlyViaLink,
    Archived,
    DefaultHidden,
    HiddenItems,
    Pinned,
}

impl CollectionSummaryType {
    /// Every summary type
    pub const ALL: [CollectionSummaryType; 15] = [
        CollectionSummaryType::Folder,
        CollectionSummaryType::Favorites,
        CollectionSummaryType::Album,
        CollectionSummaryType::Archive,
        CollectionSummaryType::Trash,
        CollectionSummaryType::Uncategorized,
        CollectionSummaryType::All,
        CollectionSummaryType::OutgoingShare,
        CollectionSummaryType::IncomingShareViewer,
        CollectionSummaryType::IncomingShareCollaborator,
        CollectionSummaryType::SharedOnlyViaLink,
        CollectionSummaryType::Archived,
        CollectionSummaryType::DefaultHidden,
        CollectionSummaryType::HiddenItems,
        CollectionSummaryType::Pinned,
    ];

    /// Category rank; lower ranks are listed first.
    ///
    /// Within one rank, summaries are ordered by the active
    /// [`CollectionsSortBy`].
    pub fn order(&self) -> u8 {
        match self {
            CollectionSummaryType::All | CollectionSummaryType::HiddenItems => 0,
            CollectionSummaryType::Uncategorized => 1,
            CollectionSummaryType::Favorites => 2,
            CollectionSummaryType::Pinned => 3,
            CollectionSummaryType::Album
            | CollectionSummaryType::Folder
            | CollectionSummaryType::IncomingShareViewer
            | CollectionSummaryType::IncomingShareCollaborator
            | CollectionSummaryType::OutgoingShare
            | CollectionSummaryType::SharedOnlyViaLink
            | CollectionSummaryType::Archived => 4,
            CollectionSummaryType::Archive => 5,
            CollectionSummaryType::Trash => 6,
            CollectionSummaryType::DefaultHidden => 7,
        }
    }
}

impl From<CollectionType> for CollectionSummaryType {
    fn from(collection_type: CollectionType) -> Self {
        match collection_type {
            CollectionType::Album => CollectionSummaryType::Album,
            CollectionType::Folder => CollectionSummaryType::Folder,
            CollectionType::Favorites => CollectionSummaryType::Favorites,
            CollectionType::Uncategorized => CollectionSummaryType::Uncategorized,
        }
    }
}

/// A collection prepared for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    /// The "UI" type for the collection
    #[serde(rename = "type")]
    pub summary_type: CollectionSummaryType,
    pub id: CollectionId,
    pub name: String,
    pub cover_file: Option<File>,
    pub latest_file: File,
    pub file_count: usize,
    pub updation_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Summaries keyed by collection id
pub type CollectionSummaries = HashMap<CollectionId, CollectionSummary>;

/// Sort schemes for lists of collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionsSortBy {
    Name,
    CreationTimeAsc,
    #[default]
    UpdationTimeDesc,
}

impl CollectionsSortBy {
    /// Every sort scheme
    pub const ALL: [CollectionsSortBy; 3] = [
        CollectionsSortBy::Name,
        CollectionsSortBy::CreationTimeAsc,
        CollectionsSortBy::UpdationTimeDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionsSortBy::Name => "name",
            CollectionsSortBy::CreationTimeAsc => "creation-time-asc",
            CollectionsSortBy::UpdationTimeDesc => "updation-time-desc",
        }
    }
}

impl fmt::Display for CollectionsSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionsSortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionsSortBy::ALL
            .into_iter()
            .find(|by| by.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = CollectionsSortBy::ALL.iter().map(|b| b.as_str()).collect();
                format!("Invalid sort scheme '{s}'. Must be one of: {}", valid.join(", "))
            })
    }
}

/// Builds display summaries from the raw library.
///
/// Collections without files are left out since they have no latest file to
/// show. When the library has any files, the pseudo "all" section is added
/// under [`CollectionId::ALL_SECTION`].
pub fn summarize_collections(collections: &[Collection], files: &[File]) -> CollectionSummaries {
    let mut by_collection: HashMap<CollectionId, Vec<&File>> = HashMap::new();
    for file in files {
        by_collection.entry(file.collection_id).or_default().push(file);
    }

    let mut summaries = CollectionSummaries::new();

    for collection in collections {
        let Some(members) = by_collection.get(&collection.id) else {
            continue;
        };
        let Some(latest) = latest_of(members.iter().copied()) else {
            continue;
        };

        summaries.insert(
            collection.id,
            CollectionSummary {
                summary_type: collection.collection_type.into(),
                id: collection.id,
                name: collection.name.clone(),
                cover_file: Some(latest.clone()),
                latest_file: latest.clone(),
                file_count: members.len(),
                updation_time: collection
                    .updation_time
                    .unwrap_or_else(|| latest.creation_time()),
                order: None,
            },
        );
    }

    if let Some(latest) = latest_of(files.iter()) {
        summaries.insert(
            CollectionId::ALL_SECTION,
            CollectionSummary {
                summary_type: CollectionSummaryType::All,
                id: CollectionId::ALL_SECTION,
                name: "All".to_string(),
                cover_file: Some(latest.clone()),
                latest_file: latest.clone(),
                file_count: files.len(),
                updation_time: latest.creation_time(),
                order: None,
            },
        );
    }

    summaries
}

/// Orders summaries for display: category rank, then explicit `order`, then
/// the chosen sort scheme, then id.
pub fn sort_collection_summaries<'a>(
    summaries: impl IntoIterator<Item = &'a CollectionSummary>,
    by: CollectionsSortBy,
) -> Vec<CollectionSummary> {
    let mut sorted: Vec<CollectionSummary> = summaries.into_iter().cloned().collect();
    sorted.sort_by(|a, b| compare_summaries(a, b, by));
    sorted
}

/// Comparator used by [`sort_collection_summaries`]
pub fn compare_summaries(
    a: &CollectionSummary,
    b: &CollectionSummary,
    by: CollectionsSortBy,
) -> Ordering {
    a.summary_type
        .order()
        .cmp(&b.summary_type.order())
        .then_with(|| match (a.order, b.order) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| match by {
            CollectionsSortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            CollectionsSortBy::CreationTimeAsc => a
                .latest_file
                .creation_time()
                .cmp(&b.latest_file.creation_time()),
            CollectionsSortBy::UpdationTimeDesc => b.updation_time.cmp(&a.updation_time),
        })
        .then_with(|| a.id.cmp(&b.id))
}

fn latest_of<'a>(files: impl Iterator<Item = &'a File>) -> Option<&'a File> {
    files.max_by(|a, b| {
        a.creation_time()
            .cmp(&b.creation_time())
            .then_with(|| a.id.cmp(&b.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::file::FileMetadata;
    use crate::domain::ids::FileId;

    fn file(id: i64, collection: i64, created: i64) -> File {
        File::new(
            FileId::new(id),
            CollectionId::new(collection),
            FileMetadata::new(format!("IMG_{id}.jpg")).with_creation_time(created),
        )
    }

    fn summary(
        id: i64,
        summary_type: CollectionSummaryType,
        name: &str,
        created: i64,
        updated: i64,
    ) -> CollectionSummary {
        let latest = file(id * 100, id, created);
        CollectionSummary {
            summary_type,
            id: CollectionId::new(id),
            name: name.to_string(),
            cover_file: None,
            latest_file: latest,
            file_count: 1,
            updation_time: updated,
            order: None,
        }
    }

    #[test]
    fn test_category_order_table() {
        use CollectionSummaryType::*;
        let expected = [
            (All, 0),
            (HiddenItems, 0),
            (Uncategorized, 1),
            (Favorites, 2),
            (Pinned, 3),
            (Album, 4),
            (Folder, 4),
            (IncomingShareViewer, 4),
            (IncomingShareCollaborator, 4),
            (OutgoingShare, 4),
            (SharedOnlyViaLink, 4),
            (Archived, 4),
            (Archive, 5),
            (Trash, 6),
            (DefaultHidden, 7),
        ];
        assert_eq!(expected.len(), CollectionSummaryType::ALL.len());
        for (summary_type, order) in expected {
            assert_eq!(summary_type.order(), order, "{summary_type:?}");
        }
    }

    #[test]
    fn test_summary_type_serde_names() {
        let json = serde_json::to_string(&CollectionSummaryType::IncomingShareCollaborator).unwrap();
        assert_eq!(json, "\"incomingShareCollaborator\"");
        let parsed: CollectionSummaryType = serde_json::from_str("\"sharedOnlyViaLink\"").unwrap();
        assert_eq!(parsed, CollectionSummaryType::SharedOnlyViaLink);
    }

    #[test]
    fn test_sort_by_parse() {
        assert_eq!("name".parse::<CollectionsSortBy>().unwrap(), CollectionsSortBy::Name);
        assert_eq!(
            "creation-time-asc".parse::<CollectionsSortBy>().unwrap(),
            CollectionsSortBy::CreationTimeAsc
        );
        assert_eq!(
            "updation-time-desc".parse::<CollectionsSortBy>().unwrap(),
            CollectionsSortBy::UpdationTimeDesc
        );
        assert!("newest".parse::<CollectionsSortBy>().is_err());
    }

    #[test]
    fn test_categories_come_before_sort_scheme() {
        let trash = summary(1, CollectionSummaryType::Trash, "aaa", 1, 900);
        let album = summary(2, CollectionSummaryType::Album, "zzz", 2, 100);
        let favorites = summary(3, CollectionSummaryType::Favorites, "mmm", 3, 50);
        let all = summary(0, CollectionSummaryType::All, "All", 4, 10);

        let sorted = sort_collection_summaries(
            [&trash, &album, &favorites, &all],
            CollectionsSortBy::Name,
        );
        let ids: Vec<i64> = sorted.iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_sort_within_category() {
        let a = summary(1, CollectionSummaryType::Album, "beach", 300, 10);
        let b = summary(2, CollectionSummaryType::Folder, "Alps", 100, 30);
        let c = summary(3, CollectionSummaryType::OutgoingShare, "city", 200, 20);

        let by_name = sort_collection_summaries([&a, &b, &c], CollectionsSortBy::Name);
        assert_eq!(
            by_name.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["Alps", "beach", "city"]
        );

        let by_creation = sort_collection_summaries([&a, &b, &c], CollectionsSortBy::CreationTimeAsc);
        assert_eq!(
            by_creation.iter().map(|s| s.id.value()).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );

        let by_update = sort_collection_summaries([&a, &b, &c], CollectionsSortBy::UpdationTimeDesc);
        assert_eq!(
            by_update.iter().map(|s| s.id.value()).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_explicit_order_wins_within_category() {
        let mut first = summary(5, CollectionSummaryType::Pinned, "zeta", 1, 1);
        first.order = Some(1);
        let mut second = summary(6, CollectionSummaryType::Pinned, "alpha", 1, 1);
        second.order = Some(2);
        let unordered = summary(7, CollectionSummaryType::Pinned, "aardvark", 1, 1);

        let sorted =
            sort_collection_summaries([&unordered, &second, &first], CollectionsSortBy::Name);
        assert_eq!(
            sorted.iter().map(|s| s.id.value()).collect::<Vec<_>>(),
            vec![5, 6, 7]
        );
    }

    #[test]
    fn test_summarize_collections() {
        let collections = vec![
            Collection::new(CollectionId::new(42), "My Trip/2023").with_updation_time(77),
            Collection::new(CollectionId::new(43), "Favs").with_type(CollectionType::Favorites),
            Collection::new(CollectionId::new(44), "Empty"),
        ];
        let files = vec![file(1, 42, 10), file(2, 42, 30), file(3, 43, 20)];

        let summaries = summarize_collections(&collections, &files);

        assert_eq!(summaries.len(), 3);
        assert!(!summaries.contains_key(&CollectionId::new(44)));

        let trip = &summaries[&CollectionId::new(42)];
        assert_eq!(trip.summary_type, CollectionSummaryType::Album);
        assert_eq!(trip.file_count, 2);
        assert_eq!(trip.latest_file.id, FileId::new(2));
        assert_eq!(trip.updation_time, 77);

        let favs = &summaries[&CollectionId::new(43)];
        assert_eq!(favs.summary_type, CollectionSummaryType::Favorites);
        assert_eq!(favs.updation_time, 20);

        let all = &summaries[&CollectionId::ALL_SECTION];
        assert_eq!(all.summary_type, CollectionSummaryType::All);
        assert_eq!(all.file_count, 3);
        assert_eq!(all.latest_file.id, FileId::new(2));
    }

    #[test]
    fn test_summarize_empty_library() {
        let summaries = summarize_collections(&[], &[]);
        assert!(summaries.is_empty());
    }
}
