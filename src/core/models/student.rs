//! Student model

use super::{Course, Term};
use crate::core::classify::{self, Classification};
use serde::{Deserialize, Serialize};

/// Everything parsed from one student's transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Student name (e.g., "John A. Smith")
    pub name: Option<String>,
    /// External student number (e.g., "V00123456")
    pub student_number: Option<String>,
    /// Terms in transcript order
    pub terms: Vec<Term>,
    /// English requirement status (e.g., "Satisfied")
    pub english_requirement: Option<String>,
    /// Cumulative GPA as of the transcript's issue
    pub cumulative_gpa: Option<f64>,
    /// Whether a qualifying degree has been conferred
    pub credential_granted: bool,
}

impl Student {
    /// Start building a student record
    #[must_use]
    pub fn builder() -> StudentBuilder {
        StudentBuilder::default()
    }

    /// All courses across all terms, in transcript order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.terms.iter().flat_map(|term| term.courses.iter())
    }

    /// Outcome label derived from the credential flag and term standings
    #[must_use]
    pub fn classification(&self) -> Classification {
        classify::classify(self)
    }
}

/// Accumulates the optional parts of a [`Student`] and finalizes it once
#[derive(Debug, Clone, Default)]
pub struct StudentBuilder {
    name: Option<String>,
    student_number: Option<String>,
    terms: Vec<Term>,
    english_requirement: Option<String>,
    cumulative_gpa: Option<f64>,
    credential_granted: bool,
}

impl StudentBuilder {
    /// Set the student number and name
    #[must_use]
    pub fn identity(mut self, student_number: Option<String>, name: Option<String>) -> Self {
        self.student_number = student_number;
        self.name = name;
        self
    }

    /// Set the terms in transcript order
    #[must_use]
    pub fn terms(mut self, terms: Vec<Term>) -> Self {
        self.terms = terms;
        self
    }

    /// Set the English requirement status
    #[must_use]
    pub fn english_requirement(mut self, status: Option<String>) -> Self {
        self.english_requirement = status;
        self
    }

    /// Set the cumulative GPA
    #[must_use]
    pub const fn cumulative_gpa(mut self, gpa: Option<f64>) -> Self {
        self.cumulative_gpa = gpa;
        self
    }

    /// Set whether a credential has been granted
    #[must_use]
    pub const fn credential_granted(mut self, granted: bool) -> Self {
        self.credential_granted = granted;
        self
    }

    /// Finalize the student record
    #[must_use]
    pub fn build(self) -> Student {
        Student {
            name: self.name,
            student_number: self.student_number,
            terms: self.terms,
            english_requirement: self.english_requirement,
            cumulative_gpa: self.cumulative_gpa,
            credential_granted: self.credential_granted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Season;

    #[test]
    fn test_empty_student() {
        let student = Student::builder().build();

        assert!(student.name.is_none());
        assert!(student.student_number.is_none());
        assert!(student.terms.is_empty());
        assert!(!student.credential_granted);
        assert_eq!(student.courses().count(), 0);
    }

    #[test]
    fn test_courses_flatten_terms_in_order() {
        let course = |number: &str| {
            Course::new(
                "CSC".to_string(),
                number.to_string(),
                "TITLE".to_string(),
                1.5,
                Some(6),
                None,
            )
        };
        let first = Term::builder(Season::Winter, 2008)
            .courses(vec![course("110"), course("115")])
            .build();
        let second = Term::builder(Season::Summer, 2009)
            .courses(vec![course("225")])
            .build();

        let student = Student::builder()
            .identity(Some("V00123456".to_string()), Some("Bob".to_string()))
            .terms(vec![first, second])
            .build();

        let numbers: Vec<&str> = student.courses().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, vec!["110", "115", "225"]);
        assert_eq!(student.student_number.as_deref(), Some("V00123456"));
    }
}
