//! Ingest command handler

use super::open_database;
use logger::error;
use std::path::Path;
use transcript_analytics::config::Config;
use transcript_analytics::core::batch::{process_path, BatchSummary};

/// Parse a file or directory of transcripts into the configured databases
///
/// # Errors
/// Returns an error message if the databases cannot be opened or the input
/// path cannot be listed
pub fn run(input: &Path, config: &Config) -> Result<BatchSummary, String> {
    let mut db = open_database(config)?;

    let summary = process_path(input, &mut db).map_err(|e| {
        error!("Ingest failed: {e}");
        e.to_string()
    })?;

    println!(
        "✓ Processed {} transcripts ({} failed) into {}",
        summary.processed, summary.failed, config.database.main
    );
    Ok(summary)
}
