//! Collections command implementation
//!
//! Prints the collection summaries of the library in display order.

use crate::adapters::local::JsonLibrary;
use crate::adapters::traits::Library;
use crate::cli::commands::load_or_report;
use crate::domain::{sort_collection_summaries, summarize_collections, CollectionsSortBy};
use clap::Args;

/// Arguments for the collections command
#[derive(Args, Debug)]
pub struct CollectionsArgs {
    /// Order within each category
    #[arg(long, default_value_t = CollectionsSortBy::default())]
    pub sort_by: CollectionsSortBy,
}

impl CollectionsArgs {
    /// Execute the collections command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        let library = JsonLibrary::new(config.library.snapshot_path.clone());
        let loaded = async {
            let files = library.get_local_files().await?;
            let collections = library.get_local_collections().await?;
            crate::domain::Result::Ok((files, collections))
        }
        .await;
        let (files, collections) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                println!("❌ Failed to read library");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        let summaries = summarize_collections(&collections, &files);
        if summaries.is_empty() {
            println!("No collections with files found.");
            return Ok(0);
        }

        let sorted = sort_collection_summaries(summaries.values(), self.sort_by);
        println!("Found {} collection(s), sorted by {}:", sorted.len(), self.sort_by);
        println!();
        println!("{:<12} {:<32} {:<16} {:>8}", "ID", "Name", "Type", "Files");
        println!("{}", "-".repeat(72));
        for summary in &sorted {
            println!(
                "{:<12} {:<32} {:<16} {:>8}",
                summary.id.to_string(),
                summary.name,
                format!("{:?}", summary.summary_type),
                summary.file_count
            );
        }

        Ok(0)
    }
}
