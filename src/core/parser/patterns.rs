//! Compiled text patterns for the plaintext transcript layout
//!
//! Each accessor returns the raw captured text for one capture contract.
//! Converting captures into typed values is left to the callers so that a
//! pattern can be tested in isolation from the model.

use regex::Regex;
use std::sync::LazyLock;

/// Student number followed by the name on the same line
const IDENTITY: &str = r"(V00[0-9]+) ([\w .]+)";

/// English (or academic writing) requirement status
const ENGLISH_REQUIREMENT: &str =
    r"(?:ENGLISH|ACADEMIC WRITING) REQUIREMENT\s+Requirement: ([\w ]+)";

/// Cumulative GPA with exactly two fraction digits
const CUMULATIVE_GPA: &str = r"CUMULATIVE GPA : ([0-9]\.[0-9]{2})";

/// Conferral line for a qualifying degree
const CREDENTIAL_GRANTED: &str =
    r"Credential Granted:\s+[0-9]{2} \w{3} [0-9]{4}\s+BACHELOR OF ENGINEERING";

/// Term header (season, start year, optional end year) and its indented body
const TERM_BLOCK: &str =
    r"(SUMMER|WINTER) ([0-9]{4})(?:-([0-9]{4}))?((?:\n[ \t]+[\w .()\t+:=,/-]+)+)";

/// Department, number, title, units, grade or status, grade point, awarded units
const COURSE_LINE: &str = r"(\w{3,4})\s+([0-9]{3}[a-zA-Z]?)\s+([\w+: -]+)\s+([0-9]\.[0-9]{2})\s+([\w+-]+)\s*([0-9])?\s*([0-9]\.[0-9]{2})?";

/// Credits earned, sessional GPA and standing for one term
const SESSION_SUMMARY: &str =
    r"Credit in ([0-9]{1,2}\.[0-9]{2}) Units\s+Sessional GPA = ([0-9]\.[0-9]{2})\s+([\w :-]+)";

/// Leading program-title text of a single indented line
const PROGRAM_LINE: &str = r"^ {2}[\w .()-]+";

/// Standing phrase for a required withdrawal
const WITHDRAWAL: &str = r"(?:REQD|REQUIRED) TO WITHDRAW";

static SHARED: LazyLock<PatternLibrary> = LazyLock::new(PatternLibrary::new);

/// Raw captures of a term block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCaptures<'t> {
    /// `SUMMER` or `WINTER`
    pub season: &'t str,
    /// Four-digit start year
    pub start_year: &'t str,
    /// Four-digit end year, when the header spans two years
    pub end_year: Option<&'t str>,
    /// Indented lines after the header, starting with a newline
    pub body: &'t str,
}

/// Raw captures of a course line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseCaptures<'t> {
    /// Department code
    pub dept: &'t str,
    /// Course number
    pub number: &'t str,
    /// Title words
    pub title: &'t str,
    /// Unit value
    pub credit: &'t str,
    /// Letter grade or special status token
    pub status: &'t str,
    /// Single-digit grade point
    pub grade_point: Option<&'t str>,
    /// Awarded units
    pub awarded: Option<&'t str>,
}

/// Raw captures of a session summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCaptures<'t> {
    /// Units earned in the session
    pub credits_earned: &'t str,
    /// Sessional GPA
    pub sessional_gpa: &'t str,
    /// Standing phrase
    pub standing: &'t str,
}

/// Pre-compiled matchers for every field of the transcript layout
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    identity: Regex,
    english_requirement: Regex,
    cumulative_gpa: Regex,
    credential_granted: Regex,
    term_block: Regex,
    course_line: Regex,
    session_summary: Regex,
    program_line: Regex,
    withdrawal: Regex,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLibrary {
    /// Compile all patterns
    ///
    /// # Panics
    /// Panics if a built-in pattern fails to compile. The patterns are
    /// constants, so this only happens if one of them is edited incorrectly.
    #[must_use]
    pub fn new() -> Self {
        let compile = |pattern: &str| {
            Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
        };
        Self {
            identity: compile(IDENTITY),
            english_requirement: compile(ENGLISH_REQUIREMENT),
            cumulative_gpa: compile(CUMULATIVE_GPA),
            credential_granted: compile(CREDENTIAL_GRANTED),
            term_block: compile(TERM_BLOCK),
            course_line: compile(COURSE_LINE),
            session_summary: compile(SESSION_SUMMARY),
            program_line: compile(PROGRAM_LINE),
            withdrawal: compile(WITHDRAWAL),
        }
    }

    /// Process-wide instance, compiled on first use and shared read-only
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// First student number and name in `text`
    #[must_use]
    pub fn identity<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        let caps = self.identity.captures(text)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str().trim_end()))
    }

    /// First English requirement status in `text`
    #[must_use]
    pub fn english_requirement<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.english_requirement
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end())
    }

    /// First cumulative GPA in `text`
    #[must_use]
    pub fn cumulative_gpa<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.cumulative_gpa
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Whether `text` records a qualifying credential
    #[must_use]
    pub fn credential_granted(&self, text: &str) -> bool {
        self.credential_granted.is_match(text)
    }

    /// All non-overlapping term blocks in document order
    pub fn term_blocks<'r, 't>(
        &'r self,
        text: &'t str,
    ) -> impl Iterator<Item = TermCaptures<'t>> + 'r
    where
        't: 'r,
    {
        self.term_block.captures_iter(text).filter_map(|caps| {
            Some(TermCaptures {
                season: caps.get(1)?.as_str(),
                start_year: caps.get(2)?.as_str(),
                end_year: caps.get(3).map(|m| m.as_str()),
                body: caps.get(4)?.as_str(),
            })
        })
    }

    /// All non-overlapping course lines in a term body, in order
    pub fn course_lines<'r, 't>(
        &'r self,
        body: &'t str,
    ) -> impl Iterator<Item = CourseCaptures<'t>> + 'r
    where
        't: 'r,
    {
        self.course_line.captures_iter(body).filter_map(|caps| {
            Some(CourseCaptures {
                dept: caps.get(1)?.as_str(),
                number: caps.get(2)?.as_str(),
                title: caps.get(3)?.as_str().trim_end(),
                credit: caps.get(4)?.as_str(),
                status: caps.get(5)?.as_str(),
                grade_point: caps.get(6).map(|m| m.as_str()),
                awarded: caps.get(7).map(|m| m.as_str()),
            })
        })
    }

    /// Whether a single line is a course line
    #[must_use]
    pub fn is_course_line(&self, line: &str) -> bool {
        self.course_line.is_match(line)
    }

    /// The session summary of a term body, if present
    #[must_use]
    pub fn session_summary<'t>(&self, body: &'t str) -> Option<SummaryCaptures<'t>> {
        let caps = self.session_summary.captures(body)?;
        Some(SummaryCaptures {
            credits_earned: caps.get(1)?.as_str(),
            sessional_gpa: caps.get(2)?.as_str(),
            standing: caps.get(3)?.as_str().trim_end(),
        })
    }

    /// Longest program-title prefix of a single line, indent included
    #[must_use]
    pub fn program_prefix<'t>(&self, line: &'t str) -> Option<&'t str> {
        self.program_line.find(line).map(|m| m.as_str())
    }

    /// Whether a whole line has the shape of a program title line
    #[must_use]
    pub fn is_program_line(&self, line: &str) -> bool {
        self.program_prefix(line).is_some_and(|prefix| prefix.len() == line.len())
    }

    /// Whether a standing phrase means the student was required to withdraw
    #[must_use]
    pub fn is_withdrawal(&self, standing: &str) -> bool {
        self.withdrawal.is_match(standing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> &'static PatternLibrary {
        PatternLibrary::shared()
    }

    #[test]
    fn test_identity_first_match_wins() {
        let text = "RECORD\nV00123456 John A. Smith\nV00999999 Someone Else\n";
        assert_eq!(
            patterns().identity(text),
            Some(("V00123456", "John A. Smith"))
        );
        assert_eq!(patterns().identity("no id here"), None);
    }

    #[test]
    fn test_english_requirement() {
        let text = "ENGLISH REQUIREMENT\n    Requirement: Satisfied\n";
        assert_eq!(patterns().english_requirement(text), Some("Satisfied"));

        let text = "ACADEMIC WRITING REQUIREMENT   Requirement: Not Satisfied\n";
        assert_eq!(patterns().english_requirement(text), Some("Not Satisfied"));
    }

    #[test]
    fn test_cumulative_gpa_needs_two_decimals() {
        assert_eq!(patterns().cumulative_gpa("CUMULATIVE GPA : 3.69"), Some("3.69"));
        assert_eq!(patterns().cumulative_gpa("CUMULATIVE GPA : 3.6"), None);
    }

    #[test]
    fn test_credential_granted() {
        assert!(patterns()
            .credential_granted("Credential Granted: 15 JUN 2012   BACHELOR OF ENGINEERING"));
        assert!(!patterns().credential_granted("Credential Granted: 15 JUN 2012 BACHELOR OF SCIENCE"));
        assert!(!patterns().credential_granted("Credential Granted: JUN 2012 BACHELOR OF ENGINEERING"));
    }

    #[test]
    fn test_term_blocks_single_and_double_year() {
        let text = "WINTER 2008-2009\n  BACHELOR OF ENGINEERING\n\nSUMMER 2009\n  CSC 225 ALGORITHMS 1.50 B 5 1.50\n";
        let blocks: Vec<_> = patterns().term_blocks(text).collect();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].season, "WINTER");
        assert_eq!(blocks[0].start_year, "2008");
        assert_eq!(blocks[0].end_year, Some("2009"));
        assert_eq!(blocks[0].body, "\n  BACHELOR OF ENGINEERING");
        assert_eq!(blocks[1].season, "SUMMER");
        assert_eq!(blocks[1].end_year, None);
    }

    #[test]
    fn test_term_header_without_body_is_skipped() {
        assert_eq!(patterns().term_blocks("WINTER 2008-2009\nNOT INDENTED").count(), 0);
    }

    #[test]
    fn test_course_line_captures() {
        let caps: Vec<_> = patterns()
            .course_lines("\n  CSC 110 PROGRAMMING 1.50 A+ 9 1.50")
            .collect();

        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].dept, "CSC");
        assert_eq!(caps[0].number, "110");
        assert_eq!(caps[0].title, "PROGRAMMING");
        assert_eq!(caps[0].credit, "1.50");
        assert_eq!(caps[0].status, "A+");
        assert_eq!(caps[0].grade_point, Some("9"));
        assert_eq!(caps[0].awarded, Some("1.50"));
    }

    #[test]
    fn test_session_summary() {
        let body = "\n  Credit in 15.00 Units   Sessional GPA = 6.50   IN GOOD ACADEMIC STANDING";
        let summary = patterns().session_summary(body).expect("summary");

        assert_eq!(summary.credits_earned, "15.00");
        assert_eq!(summary.sessional_gpa, "6.50");
        assert_eq!(summary.standing, "IN GOOD ACADEMIC STANDING");
    }

    #[test]
    fn test_program_line_shape() {
        assert!(patterns().is_program_line("  BACHELOR OF ENGINEERING"));
        assert!(patterns().is_program_line("  COMPUTER ENGINEERING (CO-OP)"));
        assert!(!patterns().is_program_line("\tBACHELOR OF ENGINEERING"));
        assert!(!patterns().is_program_line("  Credit in 15.00 Units Sessional GPA = 6.50"));
    }

    #[test]
    fn test_program_prefix_stops_at_foreign_character() {
        assert_eq!(
            patterns().program_prefix("  BACHELOR OF ENGINEERING: COMPUTER"),
            Some("  BACHELOR OF ENGINEERING")
        );
        assert_eq!(patterns().program_prefix("\tBACHELOR"), None);
    }

    #[test]
    fn test_withdrawal_phrases() {
        assert!(patterns().is_withdrawal("REQD TO WITHDRAW"));
        assert!(patterns().is_withdrawal("REQUIRED TO WITHDRAW FROM THE FACULTY"));
        assert!(!patterns().is_withdrawal("WITHDRAWN"));
    }
}
