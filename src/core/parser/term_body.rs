//! Parses the body of a single term: courses, session summary and program

use super::patterns::PatternLibrary;
use super::segmenter::TermSegment;
use crate::core::models::{Course, SessionSummary, Term};
use logger::{debug, warn};

/// Status tokens at least this long are special statuses, not letter grades
const SPECIAL_STATUS_MIN_LEN: usize = 3;

/// Special statuses seen on transcripts of this layout
///
/// Only consulted for tokens of `SPECIAL_STATUS_MIN_LEN` or more characters.
const KNOWN_SPECIAL_STATUSES: &[&str] = &["AEG", "COM", "CONTINUING", "DEF", "INC", "INP", "TRN"];

/// Marker that ends the program title on co-op transcripts
const PROGRAM_DELIMITER: &str = " Cooperative Education Work Term Details";

/// Build a complete term from a segment
#[must_use]
pub fn parse_term(patterns: &PatternLibrary, segment: &TermSegment<'_>) -> Term {
    let courses = parse_courses(patterns, segment.body);
    let summary = parse_session_summary(patterns, segment.body);
    let program = parse_program(patterns, segment.body);

    debug!(
        "Parsed {}_{}-{}: {} courses, standing {:?}",
        segment.season,
        segment.start_year,
        segment.end_year,
        courses.len(),
        summary.standing
    );

    Term::builder(segment.season, segment.start_year)
        .end_year(Some(segment.end_year))
        .courses(courses)
        .session_summary(summary)
        .program(program)
        .build()
}

/// Extract every course line from a term body, in order
///
/// A status token of three or more characters is a special status and its
/// grade point is discarded. Shorter tokens are letter grades: the grade point
/// is kept and the token itself dropped.
#[must_use]
pub fn parse_courses(patterns: &PatternLibrary, body: &str) -> Vec<Course> {
    patterns
        .course_lines(body)
        .map(|caps| {
            let special_status = if caps.status.chars().count() >= SPECIAL_STATUS_MIN_LEN {
                if !KNOWN_SPECIAL_STATUSES.contains(&caps.status) {
                    warn!(
                        "Treating unrecognized status '{}' on {} {} as a special status",
                        caps.status, caps.dept, caps.number
                    );
                }
                Some(caps.status.to_string())
            } else {
                None
            };
            let grade_point = caps.grade_point.and_then(|gp| gp.parse::<u8>().ok());

            Course::new(
                caps.dept.to_string(),
                caps.number.to_string(),
                caps.title.to_string(),
                caps.credit.parse::<f64>().unwrap_or_default(),
                grade_point,
                special_status,
            )
        })
        .collect()
}

/// Extract the session summary, with every field `None` when it is absent
#[must_use]
pub fn parse_session_summary(patterns: &PatternLibrary, body: &str) -> SessionSummary {
    patterns
        .session_summary(body)
        .map_or_else(SessionSummary::default, |caps| SessionSummary {
            credits_earned: caps.credits_earned.parse::<f64>().ok(),
            sessional_gpa: caps.sessional_gpa.parse::<f64>().ok(),
            standing: Some(caps.standing.to_string()),
        })
}

/// Extract the enrolled program from the lines directly after the term header
///
/// Program lines are the leading indented lines of the body that are not
/// course or summary lines. A line with characters outside the title set
/// contributes the text before them and ends the program. The pieces are
/// joined with single spaces and cut at the co-op work term marker.
#[must_use]
pub fn parse_program(patterns: &PatternLibrary, body: &str) -> Option<String> {
    let mut lines = Vec::new();
    for line in body.strip_prefix('\n').unwrap_or(body).split('\n') {
        if patterns.is_course_line(line) || patterns.session_summary(line).is_some() {
            break;
        }
        let Some(prefix) = patterns.program_prefix(line) else {
            break;
        };
        lines.push(prefix);
        if prefix.len() < line.len() {
            break;
        }
    }

    let collapsed = lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");
    let program = collapsed
        .split(PROGRAM_DELIMITER)
        .next()
        .unwrap_or_default()
        .trim();

    if program.is_empty() {
        None
    } else {
        Some(program.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Season;

    const BODY: &str = "
  BACHELOR OF ENGINEERING
  COMPUTER ENGINEERING
  CSC 110 FUNDAMENTALS OF PROGRAMMING I 1.50 A+ 9 1.50
  MATH 100 CALCULUS I 1.50 B 5 1.50
  ENGR 446 DESIGN PROJECT 1.50 CONTINUING 0
  Credit in 15.00 Units   Sessional GPA = 6.50   IN GOOD ACADEMIC STANDING";

    fn patterns() -> &'static PatternLibrary {
        PatternLibrary::shared()
    }

    #[test]
    fn test_parse_courses() {
        let courses = parse_courses(patterns(), BODY);

        assert_eq!(courses.len(), 3);
        assert_eq!(courses[0].code(), "CSC110");
        assert_eq!(courses[0].title, "FUNDAMENTALS OF PROGRAMMING I");
        assert_eq!(courses[0].grade_point, Some(9));
        assert!(courses[0].special_status.is_none());
        assert_eq!(courses[1].code(), "MATH100");
        assert_eq!(courses[1].grade_point, Some(5));
    }

    #[test]
    fn test_special_status_discards_grade_point() {
        let courses = parse_courses(patterns(), BODY);
        let project = &courses[2];

        assert_eq!(project.special_status.as_deref(), Some("CONTINUING"));
        assert!(project.grade_point.is_none());
    }

    #[test]
    fn test_every_course_honours_status_invariant() {
        for course in parse_courses(patterns(), BODY) {
            if course.special_status.is_some() {
                assert!(course.grade_point.is_none());
            }
        }
    }

    #[test]
    fn test_known_statuses_are_long_enough_to_be_special() {
        for status in KNOWN_SPECIAL_STATUSES {
            assert!(status.chars().count() >= SPECIAL_STATUS_MIN_LEN, "{status}");
        }
    }

    #[test]
    fn test_two_character_grade_is_not_special() {
        let courses = parse_courses(patterns(), "\n  PHYS 122 MECHANICS 1.50 B- 4 1.50");
        assert_eq!(courses.len(), 1);
        assert!(courses[0].special_status.is_none());
        assert_eq!(courses[0].grade_point, Some(4));
    }

    #[test]
    fn test_parse_session_summary() {
        let summary = parse_session_summary(patterns(), BODY);

        assert_eq!(summary.credits_earned, Some(15.0));
        assert_eq!(summary.sessional_gpa, Some(6.5));
        assert_eq!(summary.standing.as_deref(), Some("IN GOOD ACADEMIC STANDING"));
    }

    #[test]
    fn test_missing_session_summary_defaults_to_none() {
        let summary = parse_session_summary(patterns(), "\n  CSC 110 PROGRAMMING 1.50 A+ 9 1.50");
        assert_eq!(summary, SessionSummary::default());
    }

    #[test]
    fn test_parse_program_stops_at_first_course() {
        assert_eq!(
            parse_program(patterns(), BODY).as_deref(),
            Some("BACHELOR OF ENGINEERING COMPUTER ENGINEERING")
        );
    }

    #[test]
    fn test_parse_program_truncates_at_coop_marker() {
        let body = "\n  BACHELOR OF ENGINEERING\n  Cooperative Education Work Term Details\n  ENGR 001 WORK TERM 1.50 COM";
        assert_eq!(
            parse_program(patterns(), body).as_deref(),
            Some("BACHELOR OF ENGINEERING")
        );
    }

    #[test]
    fn test_parse_program_keeps_text_before_colon() {
        let body = "\n  BACHELOR OF ENGINEERING: COMPUTER\n  SOFTWARE ENGINEERING\n  CSC 110 PROGRAMMING 1.50 A+ 9 1.50";
        assert_eq!(
            parse_program(patterns(), body).as_deref(),
            Some("BACHELOR OF ENGINEERING")
        );
    }

    #[test]
    fn test_parse_program_ignores_summary_line() {
        let body = "\n  Credit in 0.00 Units   Sessional GPA = 0.00   IN GOOD ACADEMIC STANDING";
        assert!(parse_program(patterns(), body).is_none());
    }

    #[test]
    fn test_parse_program_absent() {
        assert!(parse_program(patterns(), "\n  CSC 110 PROGRAMMING 1.50 A+ 9 1.50").is_none());
    }

    #[test]
    fn test_parse_term_from_segment() {
        let segment = TermSegment {
            season: Season::Winter,
            start_year: 2008,
            end_year: 2009,
            body: BODY,
        };
        let term = parse_term(patterns(), &segment);

        assert_eq!(term.label(), "WINTER_2008-2009");
        assert_eq!(term.courses.len(), 3);
        assert_eq!(term.standing.as_deref(), Some("IN GOOD ACADEMIC STANDING"));
        assert_eq!(term.credits_earned, Some(15.0));
        assert_eq!(
            term.program.as_deref(),
            Some("BACHELOR OF ENGINEERING COMPUTER ENGINEERING")
        );
    }
}
