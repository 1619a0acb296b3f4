//! Term model

use super::Course;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Session offering a term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    /// Summer session (single calendar year)
    Summer,
    /// Winter session (usually spans two calendar years)
    Winter,
}

impl Season {
    /// Keyword used on transcripts and in storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summer => "SUMMER",
            Self::Winter => "WINTER",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUMMER" => Ok(Self::Summer),
            "WINTER" => Ok(Self::Winter),
            _ => Err(format!("Unknown season: '{s}'")),
        }
    }
}

/// End-of-session results printed after a term's courses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Units earned in the session
    pub credits_earned: Option<f64>,
    /// GPA for the session only
    pub sessional_gpa: Option<f64>,
    /// Standing verdict (e.g., "IN GOOD ACADEMIC STANDING")
    pub standing: Option<String>,
}

/// One academic session in a student's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Session offering
    pub season: Season,
    /// First calendar year of the term
    pub start_year: u16,
    /// Last calendar year of the term (equals `start_year` for single-year terms)
    pub end_year: u16,
    /// Courses in transcript order
    pub courses: Vec<Course>,
    /// Standing after the term
    pub standing: Option<String>,
    /// Sessional GPA
    pub sessional_gpa: Option<f64>,
    /// Units earned in the term
    pub credits_earned: Option<f64>,
    /// Program the student was enrolled in
    pub program: Option<String>,
}

impl Term {
    /// Start building a term for `season` beginning in `start_year`
    #[must_use]
    pub const fn builder(season: Season, start_year: u16) -> TermBuilder {
        TermBuilder {
            season,
            start_year,
            end_year: None,
            courses: Vec::new(),
            summary: SessionSummary {
                credits_earned: None,
                sessional_gpa: None,
                standing: None,
            },
            program: None,
        }
    }

    /// Label identifying the term, e.g. `WINTER_2008-2009`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}_{}-{}", self.season, self.start_year, self.end_year)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Accumulates the optional parts of a [`Term`] and finalizes it once
#[derive(Debug, Clone)]
pub struct TermBuilder {
    season: Season,
    start_year: u16,
    end_year: Option<u16>,
    courses: Vec<Course>,
    summary: SessionSummary,
    program: Option<String>,
}

impl TermBuilder {
    /// Set the end year; omitted or `None` means a single-year term
    #[must_use]
    pub const fn end_year(mut self, end_year: Option<u16>) -> Self {
        self.end_year = end_year;
        self
    }

    /// Set the courses taken in the term
    #[must_use]
    pub fn courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    /// Apply the session summary (credits, sessional GPA, standing)
    #[must_use]
    pub fn session_summary(mut self, summary: SessionSummary) -> Self {
        self.summary = summary;
        self
    }

    /// Set the enrolled program
    #[must_use]
    pub fn program(mut self, program: Option<String>) -> Self {
        self.program = program;
        self
    }

    /// Finalize the term
    #[must_use]
    pub fn build(self) -> Term {
        Term {
            season: self.season,
            start_year: self.start_year,
            end_year: self.end_year.unwrap_or(self.start_year),
            courses: self.courses,
            standing: self.summary.standing,
            sessional_gpa: self.summary.sessional_gpa,
            credits_earned: self.summary.credits_earned,
            program: self.program,
        }
    }
}
