//! Report generation from the stored academic database
//!
//! Reports are built as a [`ResultsTable`] and written out as CSV.

pub mod first_year;
pub mod results_table;

use crate::core::storage::Database;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use first_year::{first_year_grades, LABEL_COLUMN};
pub use results_table::ResultsTable;

/// Available reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Lowest grade per canonical first-year course, with the outcome label
    FirstYear,
}

impl ReportKind {
    /// Default output file name for this report
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::FirstYear => "first_year_grades.csv",
        }
    }

    /// Build the report table
    ///
    /// # Errors
    /// Returns an error if a database query fails
    pub fn build(self, db: &Database) -> Result<ResultsTable, Box<dyn Error>> {
        match self {
            Self::FirstYear => first_year_grades(db),
        }
    }

    /// Build the report and write it as CSV
    ///
    /// # Errors
    /// Returns an error if a query fails or the file cannot be written
    pub fn generate(self, db: &Database, output_path: &Path) -> Result<(), Box<dyn Error>> {
        self.build(db)?.write_csv(output_path)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstYear => write!(f, "first-year"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-year" | "first_year" | "firstyear" => Ok(Self::FirstYear),
            _ => Err(format!("Unknown report: '{s}'")),
        }
    }
}
