//! Outcome classification for assembled student records
//!
//! The label is a pure function of the credential flag and the sequence of
//! term standings. Terms without a standing carry no evidence and are skipped.

use crate::core::models::Student;
use crate::core::parser::PatternLibrary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Substring marking a probation standing
const PROBATION_STANDING: &str = "PROBATION";

/// Academic outcome label for a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Credential granted with a clean standing history
    Successful,
    /// Credential granted after probation or a required withdrawal
    Probation,
    /// No credential and required to withdraw
    Failed,
    /// No credential and no withdrawal: still studying, or not enough evidence
    InProgressOrInvalid,
}

impl Classification {
    /// Single-character code used in storage and reports
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Successful => "s",
            Self::Probation => "p",
            Self::Failed => "f",
            Self::InProgressOrInvalid => "i",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(Self::Successful),
            "p" => Ok(Self::Probation),
            "f" => Ok(Self::Failed),
            "i" => Ok(Self::InProgressOrInvalid),
            _ => Err(format!("Unknown classification code: '{s}'")),
        }
    }
}

/// Standings of every term that has one, in transcript order
fn standings(student: &Student) -> impl Iterator<Item = &str> {
    student.terms.iter().filter_map(|term| term.standing.as_deref())
}

/// Whether any term placed the student on probation
#[must_use]
pub fn was_on_probation(student: &Student) -> bool {
    standings(student).any(|standing| standing.contains(PROBATION_STANDING))
}

/// Whether any term required the student to withdraw
#[must_use]
pub fn was_required_to_withdraw(student: &Student) -> bool {
    let patterns = PatternLibrary::shared();
    standings(student).any(|standing| patterns.is_withdrawal(standing))
}

/// Classify a student's academic outcome
///
/// Rules, in priority order:
/// 1. Credential granted: probation or required withdrawal in any term gives
///    [`Classification::Probation`], otherwise [`Classification::Successful`].
/// 2. No credential: required withdrawal in any term gives
///    [`Classification::Failed`], otherwise [`Classification::InProgressOrInvalid`].
#[must_use]
pub fn classify(student: &Student) -> Classification {
    if student.credential_granted {
        if was_on_probation(student) || was_required_to_withdraw(student) {
            Classification::Probation
        } else {
            Classification::Successful
        }
    } else if was_required_to_withdraw(student) {
        Classification::Failed
    } else {
        Classification::InProgressOrInvalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Season, SessionSummary, Term};

    fn term_with_standing(standing: Option<&str>) -> Term {
        Term::builder(Season::Winter, 2009)
            .end_year(Some(2010))
            .session_summary(SessionSummary {
                standing: standing.map(str::to_string),
                ..SessionSummary::default()
            })
            .build()
    }

    fn student(granted: bool, standings: &[Option<&str>]) -> Student {
        Student::builder()
            .credential_granted(granted)
            .terms(standings.iter().map(|s| term_with_standing(*s)).collect())
            .build()
    }

    #[test]
    fn test_empty_student_is_in_progress() {
        assert_eq!(
            classify(&Student::builder().build()),
            Classification::InProgressOrInvalid
        );
    }

    #[test]
    fn test_granted_clean_history_is_successful() {
        let s = student(true, &[Some("IN GOOD ACADEMIC STANDING"), None]);
        assert_eq!(classify(&s), Classification::Successful);
    }

    #[test]
    fn test_granted_with_probation() {
        let s = student(
            true,
            &[
                Some("IN GOOD ACADEMIC STANDING"),
                Some("PLACED ON FACULTY PROBATION"),
            ],
        );
        assert_eq!(classify(&s), Classification::Probation);
    }

    #[test]
    fn test_granted_with_withdrawal_counts_as_probation() {
        let s = student(true, &[Some("REQUIRED TO WITHDRAW FROM FACULTY")]);
        assert_eq!(classify(&s), Classification::Probation);
    }

    #[test]
    fn test_not_granted_with_withdrawal_is_failed() {
        let s = student(false, &[Some("REQD TO WITHDRAW")]);
        assert_eq!(classify(&s), Classification::Failed);
    }

    #[test]
    fn test_not_granted_probation_only_is_in_progress() {
        let s = student(false, &[Some("PLACED ON FACULTY PROBATION"), None]);
        assert_eq!(classify(&s), Classification::InProgressOrInvalid);
    }

    #[test]
    fn test_null_standings_are_skipped() {
        let s = student(true, &[None, None]);
        assert!(!was_on_probation(&s));
        assert!(!was_required_to_withdraw(&s));
        assert_eq!(classify(&s), Classification::Successful);
    }

    #[test]
    fn test_classification_codes_round_trip() {
        for c in [
            Classification::Successful,
            Classification::Probation,
            Classification::Failed,
            Classification::InProgressOrInvalid,
        ] {
            assert_eq!(c.code().parse::<Classification>(), Ok(c));
        }
        assert!("x".parse::<Classification>().is_err());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let s = student(false, &[Some("REQD TO WITHDRAW")]);
        assert_eq!(classify(&s), classify(&s));
        assert_eq!(s.classification(), Classification::Failed);
    }
}
