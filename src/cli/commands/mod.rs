//! CLI command handlers for `transcripts`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod ingest;
pub mod parse;
pub mod report;

use std::path::Path;
use transcript_analytics::config::Config;
use transcript_analytics::core::storage::Database;

/// Open the configured academic and identity databases
///
/// Parent directories are created on demand.
///
/// # Errors
/// Returns an error message if a directory cannot be created or a database
/// cannot be opened
pub fn open_database(config: &Config) -> Result<Database, String> {
    for path in [&config.database.main, &config.database.ids] {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
            }
        }
    }
    Database::open(&config.database.main, &config.database.ids)
        .map_err(|e| format!("Failed to open databases: {e}"))
}
