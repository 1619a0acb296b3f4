//! First-year course grades per student

use super::results_table::ResultsTable;
use crate::core::normalizer::CourseNormalizer;
use crate::core::storage::Database;
use logger::debug;
use std::collections::HashMap;
use std::error::Error;

/// Column id of the classification label; catalog ids are always positive
pub const LABEL_COLUMN: i64 = -1;

/// Build the first-year grades table
///
/// One column per canonical first-year course found in the catalog, then a
/// `Label` column with the classification code. One row per stored student,
/// ordered by student id. When a student has several grades for the same
/// canonical course, the lowest grade point is kept.
///
/// # Errors
/// Returns an error if a database query fails
pub fn first_year_grades(db: &Database) -> Result<ResultsTable, Box<dyn Error>> {
    let catalog = db.first_year_catalog()?;
    let normalizer = CourseNormalizer::first_year(&catalog);

    let mut columns = normalizer.canonical_courses().to_vec();
    columns.push((LABEL_COLUMN, "Label".to_string()));
    let mut table = ResultsTable::new(columns);

    let mut grades: HashMap<i64, HashMap<i64, Option<u8>>> = HashMap::new();
    for registration in db.registrations()? {
        let Some(cid) = normalizer.normalized_cid(registration.cid) else {
            continue;
        };
        let slot = grades
            .entry(registration.sid)
            .or_default()
            .entry(cid)
            .or_insert(registration.grade_point);
        *slot = lowest(*slot, registration.grade_point);
    }

    for (sid, label) in db.student_labels()? {
        let mut values: HashMap<i64, Option<String>> = grades
            .remove(&sid)
            .unwrap_or_default()
            .into_iter()
            .map(|(cid, grade)| (cid, grade.map(|g| g.to_string())))
            .collect();
        values.insert(LABEL_COLUMN, Some(label));
        table.add_row(sid, &values);
    }

    debug!(
        "First-year report: {} courses, {} students",
        table.column_ids().len() - 1,
        table.rows().len()
    );
    Ok(table)
}

/// Lower of two grade points; a missing grade never wins over a present one
fn lowest(a: Option<u8>, b: Option<u8>) -> Option<u8> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Season, SessionSummary, Student, Term};

    fn course(code: (&str, &str), grade_point: Option<u8>, status: Option<&str>) -> Course {
        Course::new(
            code.0.to_string(),
            code.1.to_string(),
            "TITLE".to_string(),
            1.5,
            grade_point,
            status.map(str::to_string),
        )
    }

    fn student(courses: Vec<Course>, granted: bool) -> Student {
        let term = Term::builder(Season::Winter, 2008)
            .end_year(Some(2009))
            .courses(courses)
            .session_summary(SessionSummary {
                standing: Some("IN GOOD ACADEMIC STANDING".to_string()),
                ..SessionSummary::default()
            })
            .build();
        Student::builder()
            .terms(vec![term])
            .credential_granted(granted)
            .build()
    }

    #[test]
    fn test_lowest() {
        assert_eq!(lowest(Some(5), Some(3)), Some(3));
        assert_eq!(lowest(None, Some(3)), Some(3));
        assert_eq!(lowest(Some(5), None), Some(5));
        assert_eq!(lowest(None, None), None);
    }

    #[test]
    fn test_equivalent_courses_share_a_column_and_keep_lowest_grade() {
        let mut db = Database::open_in_memory().unwrap();
        db.write_student(&student(
            vec![
                course(("CSC", "111"), Some(8), None),
                course(("MATH", "100"), Some(6), None),
                course(("CSC", "225"), Some(9), None),
            ],
            true,
        ))
        .unwrap();
        db.write_student(&student(
            vec![
                course(("CSC", "110"), Some(2), None),
                course(("CSC", "111"), Some(4), None),
            ],
            false,
        ))
        .unwrap();

        let table = first_year_grades(&db).unwrap();

        assert_eq!(table.header(), &["", "CSC111", "MATH100", "Label"]);
        assert_eq!(
            table.rows(),
            &[vec!["1", "8", "6", "s"], vec!["2", "2", "", "i"]]
        );
    }

    #[test]
    fn test_special_status_only_leaves_cell_empty() {
        let mut db = Database::open_in_memory().unwrap();
        db.write_student(&student(
            vec![course(("MATH", "100"), None, Some("DEF"))],
            false,
        ))
        .unwrap();

        let table = first_year_grades(&db).unwrap();
        assert_eq!(table.rows(), &[vec!["1", "", "i"]]);
    }

    #[test]
    fn test_empty_database() {
        let db = Database::open_in_memory().unwrap();
        let table = first_year_grades(&db).unwrap();

        assert_eq!(table.header(), &["", "Label"]);
        assert!(table.rows().is_empty());
    }
}
