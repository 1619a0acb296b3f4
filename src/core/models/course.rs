//! Course model

use serde::{Deserialize, Serialize};

/// A course a student took in one term, as it appears on the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Department code (e.g., "CSC", "MATH")
    pub dept: String,

    /// Course number, three digits with an optional letter (e.g., "110", "299B")
    pub number: String,

    /// Course title as printed (e.g., "FUNDAMENTALS OF PROGRAMMING I")
    pub title: String,

    /// Unit value of the course (e.g., 1.50)
    pub credit: f64,

    /// Grade point on the 0-9 scale; `None` for special statuses
    pub grade_point: Option<u8>,

    /// Completion marker other than a letter grade (e.g., "CONTINUING", "COM")
    pub special_status: Option<String>,
}

impl Course {
    /// Create a new course
    ///
    /// A grade point is never kept alongside a special status: when
    /// `special_status` is present, `grade_point` is dropped.
    ///
    /// # Arguments
    /// * `dept` - Department code
    /// * `number` - Course number
    /// * `title` - Course title
    /// * `credit` - Unit value
    /// * `grade_point` - Grade point, if the course was graded
    /// * `special_status` - Special completion status, if any
    #[must_use]
    pub fn new(
        dept: String,
        number: String,
        title: String,
        credit: f64,
        grade_point: Option<u8>,
        special_status: Option<String>,
    ) -> Self {
        let grade_point = if special_status.is_some() {
            None
        } else {
            grade_point
        };
        Self {
            dept,
            number,
            title,
            credit,
            grade_point,
            special_status,
        }
    }

    /// Get the course code used for catalog lookups (dept + number)
    ///
    /// # Returns
    /// A string in the format "DEPTNUMBER" (e.g., "CSC110")
    #[must_use]
    pub fn code(&self) -> String {
        format!("{}{}", self.dept, self.number)
    }

    /// Whether this is a first-year course (number starts with `1`)
    #[must_use]
    pub fn is_first_year(&self) -> bool {
        self.number.starts_with('1')
    }
}
