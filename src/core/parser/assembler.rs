//! Turns one transcript's full text into a [`Student`]

use super::patterns::PatternLibrary;
use super::segmenter::segment;
use super::term_body::parse_term;
use crate::core::models::Student;
use std::borrow::Cow;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Convert `\r\n` line endings to `\n`; text already in that form is borrowed
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Parse a transcript using the shared pattern library
///
/// Never fails: every field that cannot be found is left empty.
#[must_use]
pub fn parse_transcript(raw_text: &str) -> Student {
    parse_transcript_with(PatternLibrary::shared(), raw_text)
}

/// Parse a transcript using the given pattern library
#[must_use]
pub fn parse_transcript_with(patterns: &PatternLibrary, raw_text: &str) -> Student {
    let text = normalize_newlines(raw_text);

    let (student_number, name) = patterns
        .identity(&text)
        .map_or((None, None), |(number, name)| {
            (Some(number.to_string()), Some(name.to_string()))
        });
    let english_requirement = patterns.english_requirement(&text).map(str::to_string);
    let cumulative_gpa = patterns
        .cumulative_gpa(&text)
        .and_then(|gpa| gpa.parse::<f64>().ok());
    let credential_granted = patterns.credential_granted(&text);

    let terms = segment(patterns, &text)
        .iter()
        .map(|seg| parse_term(patterns, seg))
        .collect();

    Student::builder()
        .identity(student_number, name)
        .english_requirement(english_requirement)
        .cumulative_gpa(cumulative_gpa)
        .credential_granted(credential_granted)
        .terms(terms)
        .build()
}

/// Read a transcript file and parse it
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn parse_transcript_file<P: AsRef<Path>>(path: P) -> Result<Student, Box<dyn Error>> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| format!("Failed to read {}: {e}", path.as_ref().display()))?;
    Ok(parse_transcript(&content))
}
