//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Shutter using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Shutter - resumable photo library export
#[derive(Parser, Debug)]
#[command(name = "shutter")]
#[command(version, about, long_about = None)]
#[command(author = "Shutter Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shutter.toml", env = "SHUTTER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHUTTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every library file to the destination folder
    Export(commands::export::ExportArgs),

    /// Select and persist the export destination folder
    SelectFolder(commands::select_folder::SelectFolderArgs),

    /// Show the persisted export settings and ledger size
    Status(commands::status::StatusArgs),

    /// List collection summaries in display order
    Collections(commands::collections::CollectionsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CollectionsSortBy;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["shutter", "export"]);
        assert_eq!(cli.config, "shutter.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "shutter",
            "export",
            "--yes",
            "--folder",
            "/tmp/photos",
            "--retry-failed",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert!(args.yes);
                assert!(args.retry_failed);
                assert_eq!(args.folder, Some("/tmp/photos".into()));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["shutter", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["shutter", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_select_folder() {
        let cli = Cli::parse_from(["shutter", "select-folder", "/mnt/backup"]);
        match cli.command {
            Commands::SelectFolder(args) => assert_eq!(args.path, Some("/mnt/backup".into())),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_collections_sort() {
        let cli = Cli::parse_from(["shutter", "collections"]);
        match cli.command {
            Commands::Collections(args) => {
                assert_eq!(args.sort_by, CollectionsSortBy::UpdationTimeDesc)
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from(["shutter", "collections", "--sort-by", "name"]);
        match cli.command {
            Commands::Collections(args) => assert_eq!(args.sort_by, CollectionsSortBy::Name),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_sort() {
        let result = Cli::try_parse_from(["shutter", "collections", "--sort-by", "size"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["shutter", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["shutter", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
