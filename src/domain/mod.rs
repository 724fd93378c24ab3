//! Domain models and types for Shutter.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`FileId`], [`CollectionId`])
//! - **Library models** ([`File`], [`Collection`])
//! - **Display read-model** ([`CollectionSummary`] and its ordering)
//! - **Error types** ([`ShutterError`], [`DownloadError`], [`BridgeError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! File and collection identifiers are distinct newtypes, so one cannot be
//! passed where the other is expected:
//!
//! ```rust
//! use shutter::domain::{CollectionId, FileId};
//!
//! let file_id = FileId::new(7);
//! let collection_id = CollectionId::new(42);
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: CollectionId = file_id;
//! # let _ = (file_id, collection_id);
//! ```

pub mod collection;
pub mod collection_summary;
pub mod errors;
pub mod file;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use collection::{Collection, CollectionType};
pub use collection_summary::{
    sort_collection_summaries, summarize_collections, CollectionSummaries, CollectionSummary,
    CollectionSummaryType, CollectionsSortBy,
};
pub use errors::{BridgeError, DownloadError, ShutterError};
pub use file::{File, FileMetadata};
pub use ids::{CollectionId, FileId};
pub use result::Result;
