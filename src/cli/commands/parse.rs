//! Parse command handler

use logger::{error, info};
use std::path::PathBuf;
use transcript_analytics::core::models::Student;
use transcript_analytics::core::parser::parse_transcript_file;

/// Parse each file and print a summary line or the full JSON record
///
/// Returns the number of files that could not be read.
pub fn run(files: &[PathBuf], json: bool) -> usize {
    let mut failed = 0;

    for path in files {
        match parse_transcript_file(path) {
            Ok(student) => {
                if json {
                    match serde_json::to_string_pretty(&student) {
                        Ok(rendered) => println!("{rendered}"),
                        Err(e) => {
                            error!("Failed to serialize {}: {e}", path.display());
                            failed += 1;
                        }
                    }
                } else {
                    println!("{}", summary_line(&student));
                }
            }
            Err(e) => {
                error!("{e}");
                eprintln!("✗ {e}");
                failed += 1;
            }
        }
    }

    info!("Parsed {} of {} files", files.len() - failed, files.len());
    failed
}

/// One tab-separated line: number, name, term count, course count, label
fn summary_line(student: &Student) -> String {
    format!(
        "{}\t{}\t{} terms\t{} courses\t{}",
        student.student_number.as_deref().unwrap_or("-"),
        student.name.as_deref().unwrap_or("-"),
        student.terms.len(),
        student.courses().count(),
        student.classification().code()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_analytics::core::parser::parse_transcript;

    #[test]
    fn test_summary_line() {
        let student = parse_transcript(
            "V00123456 John A. Smith\n\nWINTER 2008-2009\n  CSC 110 PROGRAMMING 1.50 A+ 9 1.50\n",
        );
        assert_eq!(
            summary_line(&student),
            "V00123456\tJohn A. Smith\t1 terms\t1 courses\ti"
        );
    }

    #[test]
    fn test_summary_line_for_empty_record() {
        let student = parse_transcript("");
        assert_eq!(summary_line(&student), "-\t-\t0 terms\t0 courses\ti");
    }
}
