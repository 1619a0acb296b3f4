//! Data models for parsed transcripts

pub mod course;
pub mod student;
pub mod term;

pub use course::Course;
pub use student::{Student, StudentBuilder};
pub use term::{Season, SessionSummary, Term, TermBuilder};
