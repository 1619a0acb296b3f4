//! Report command handler

use super::open_database;
use logger::info;
use std::path::{Path, PathBuf};
use transcript_analytics::config::Config;
use transcript_analytics::core::report::ReportKind;

/// Generate a report from the stored records
///
/// Writes to `output` when given, otherwise to the report's default file name
/// inside the configured reports directory.
///
/// # Errors
/// Returns an error message if the databases cannot be opened or the report
/// cannot be built or written
pub fn run(kind: ReportKind, output: Option<&Path>, config: &Config) -> Result<PathBuf, String> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let reports_dir = PathBuf::from(&config.paths.reports_dir);
            std::fs::create_dir_all(&reports_dir).map_err(|e| {
                format!(
                    "Failed to create reports directory {}: {e}",
                    reports_dir.display()
                )
            })?;
            reports_dir.join(kind.default_file_name())
        }
    };

    let db = open_database(config)?;
    kind.generate(&db, &output_path)
        .map_err(|e| format!("Failed to generate {kind} report: {e}"))?;

    info!("Wrote {kind} report to {}", output_path.display());
    Ok(output_path)
}
