//! Batch ingestion of transcript files into the databases
//!
//! Files are parsed in parallel, chunk by chunk, and the parsed students are
//! written sequentially on the caller's [`Database`]. A file that cannot be
//! read or stored is logged and counted, and the batch moves on.

use crate::core::parser::parse_transcript_file;
use crate::core::storage::Database;
use logger::{error, info, verbose};
use rayon::prelude::*;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Files parsed in parallel before their results are written
const CHUNK_SIZE: usize = 256;

/// Outcome counts of one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files parsed and stored
    pub processed: usize,
    /// Files skipped because of a read or database error
    pub failed: usize,
}

impl BatchSummary {
    /// Total files seen
    #[must_use]
    pub const fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Ingest a single transcript file or every regular file in a directory
///
/// # Errors
/// Returns an error if `path` does not exist or the directory cannot be listed
pub fn process_path(path: &Path, db: &mut Database) -> Result<BatchSummary, Box<dyn Error>> {
    if path.is_dir() {
        process_directory(path, db)
    } else if path.is_file() {
        Ok(process_files(&[path.to_path_buf()], db))
    } else {
        Err(format!("Input path not found: {}", path.display()).into())
    }
}

/// Ingest every regular file in `dir`, in file name order
///
/// # Errors
/// Returns an error if the directory cannot be listed
pub fn process_directory(dir: &Path, db: &mut Database) -> Result<BatchSummary, Box<dyn Error>> {
    let files = list_files(dir)?;
    info!("Processing {} files from {}", files.len(), dir.display());
    Ok(process_files(&files, db))
}

/// Parse and store the given files
///
/// Never fails as a whole; per-file failures are logged and counted.
pub fn process_files(files: &[PathBuf], db: &mut Database) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for chunk in files.chunks(CHUNK_SIZE) {
        let parsed: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, parse_transcript_file(path).map_err(|e| e.to_string())))
            .collect();

        for (path, result) in parsed {
            let stored = result.and_then(|student| {
                db.write_student(&student)
                    .map_err(|e| format!("Failed to store {}: {e}", path.display()))
            });
            match stored {
                Ok(sid) => {
                    verbose!("Processed {} (sid {sid})", path.display());
                    summary.processed += 1;
                }
                Err(e) => {
                    error!("{e}");
                    summary.failed += 1;
                }
            }
        }
    }

    info!(
        "Batch finished: {} processed, {} failed",
        summary.processed, summary.failed
    );
    summary
}

/// Regular files directly inside `dir`, sorted by path
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TRANSCRIPT: &str = "\
V00123456 John A. Smith

WINTER 2008-2009
  CSC 110 PROGRAMMING 1.50 A+ 9 1.50
  Credit in 1.50 Units   Sessional GPA = 9.00   IN GOOD ACADEMIC STANDING
";

    #[test]
    fn test_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.txt");
        fs::write(&path, TRANSCRIPT).unwrap();

        let mut db = Database::open_in_memory().unwrap();
        let summary = process_path(&path, &mut db).unwrap();

        assert_eq!(summary, BatchSummary { processed: 1, failed: 0 });
        assert_eq!(db.student_count().unwrap(), 1);
    }

    #[test]
    fn test_directory_counts_unreadable_files_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), TRANSCRIPT).unwrap();
        fs::write(dir.path().join("b.txt"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("c.txt"), TRANSCRIPT).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let mut db = Database::open_in_memory().unwrap();
        let summary = process_path(dir.path(), &mut db).unwrap();

        assert_eq!(summary, BatchSummary { processed: 2, failed: 1 });
        assert_eq!(summary.total(), 3);
        assert_eq!(db.student_count().unwrap(), 2);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open_in_memory().unwrap();
        assert!(process_path(&dir.path().join("missing"), &mut db).is_err());
    }

    #[test]
    fn test_directory_files_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();

        let files = list_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }
}
