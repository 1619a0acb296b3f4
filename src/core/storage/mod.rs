//! SQLite persistence for parsed students
//!
//! Records are split across two databases. The academic database holds the
//! anonymous academic history keyed by a generated student id (`sid`); the
//! identity database maps that id back to the student number and name, so
//! the academic data can be shared without identifying anyone.

pub mod schema;

use crate::core::models::{Course, Student, Term};
use logger::{debug, verbose};
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::Path;

/// One stored course registration with its catalog code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRow {
    /// Generated student id
    pub sid: i64,
    /// Catalog course id
    pub cid: i64,
    /// Department and number concatenated (e.g., "CSC110")
    pub code: String,
    /// Grade point, absent for special statuses
    pub grade_point: Option<u8>,
    /// Special status, if any
    pub special_status: Option<String>,
}

/// Connections to the academic and identity databases
#[derive(Debug)]
pub struct Database {
    main: Connection,
    ids: Connection,
}

impl Database {
    /// Open (creating if needed) both databases
    ///
    /// # Errors
    /// Returns an error if either database cannot be opened or its schema
    /// cannot be created.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(main_path: P, ids_path: Q) -> Result<Self> {
        debug!(
            "Opening databases: main={} ids={}",
            main_path.as_ref().display(),
            ids_path.as_ref().display()
        );
        Self::from_connections(Connection::open(main_path)?, Connection::open(ids_path)?)
    }

    /// Open both databases in memory
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connections(Connection::open_in_memory()?, Connection::open_in_memory()?)
    }

    fn from_connections(main: Connection, ids: Connection) -> Result<Self> {
        main.execute_batch(schema::MAIN_SCHEMA)?;
        ids.execute_batch(schema::ID_SCHEMA)?;
        Ok(Self { main, ids })
    }

    /// Store one student and return the generated student id
    ///
    /// Terms and courses not yet in the catalog are added first. The
    /// academic and identity writes each run in their own transaction.
    ///
    /// # Errors
    /// Returns an error if any statement fails; nothing from this student is
    /// kept in a database whose transaction did not commit.
    pub fn write_student(&mut self, student: &Student) -> Result<i64> {
        let main = self.main.transaction()?;

        let mut term_ids = Vec::with_capacity(student.terms.len());
        let mut course_ids = Vec::with_capacity(student.terms.len());
        for term in &student.terms {
            term_ids.push(ensure_term(&main, term)?);
            course_ids.push(
                term.courses
                    .iter()
                    .map(|course| ensure_course(&main, course))
                    .collect::<Result<Vec<_>>>()?,
            );
        }

        main.execute(
            "INSERT INTO students (cumulative_gpa, english_req, classification) VALUES (?1, ?2, ?3)",
            params![
                student.cumulative_gpa,
                student.english_requirement,
                student.classification().code()
            ],
        )?;
        let sid = main.last_insert_rowid();

        for ((term, tid), cids) in student.terms.iter().zip(&term_ids).zip(&course_ids) {
            for (course, cid) in term.courses.iter().zip(cids) {
                main.execute(
                    "INSERT INTO registrations (sid, cid, tid, grade_point, special_status) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![sid, cid, tid, course.grade_point, course.special_status],
                )?;
            }
            main.execute(
                "INSERT INTO term_status (sid, tid, standing, sessional_gpa, credits_earned, program) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    sid,
                    tid,
                    term.standing,
                    term.sessional_gpa,
                    term.credits_earned,
                    term.program
                ],
            )?;
        }

        let ids = self.ids.transaction()?;
        ids.execute(
            "INSERT INTO student_ids (sid, student_number, student_name) VALUES (?1, ?2, ?3)",
            params![sid, student.student_number, student.name],
        )?;

        main.commit()?;
        ids.commit()?;

        verbose!(
            "Stored student {} as sid {sid} ({} terms)",
            student.student_number.as_deref().unwrap_or("<unknown>"),
            student.terms.len()
        );
        Ok(sid)
    }

    /// Number of stored students
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn student_count(&self) -> Result<i64> {
        self.main
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
    }

    /// Catalog courses whose number starts with `1`, as `(cid, code)`
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn first_year_catalog(&self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self.main.prepare(
            "SELECT cid, dept || number FROM courses WHERE number LIKE '1%' ORDER BY cid",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let catalog = rows.collect::<Result<Vec<_>>>()?;
        Ok(catalog)
    }

    /// Every registration, ordered by student then insertion
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn registrations(&self) -> Result<Vec<RegistrationRow>> {
        let mut stmt = self.main.prepare(
            "SELECT r.sid, r.cid, c.dept || c.number, r.grade_point, r.special_status
             FROM registrations r JOIN courses c ON c.cid = r.cid
             ORDER BY r.sid, r.rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RegistrationRow {
                sid: row.get(0)?,
                cid: row.get(1)?,
                code: row.get(2)?,
                grade_point: row.get(3)?,
                special_status: row.get(4)?,
            })
        })?;
        let registrations = rows.collect::<Result<Vec<_>>>()?;
        Ok(registrations)
    }

    /// Classification code of every student, ordered by sid
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn student_labels(&self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self
            .main
            .prepare("SELECT sid, classification FROM students ORDER BY sid")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let labels = rows.collect::<Result<Vec<_>>>()?;
        Ok(labels)
    }

    /// Term standings recorded for one student, in transcript order
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn standings(&self, sid: i64) -> Result<Vec<Option<String>>> {
        let mut stmt = self
            .main
            .prepare("SELECT standing FROM term_status WHERE sid = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map([sid], |row| row.get(0))?;
        let standings = rows.collect::<Result<Vec<_>>>()?;
        Ok(standings)
    }

    /// Student number and name for an anonymous id
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn identity(&self, sid: i64) -> Result<Option<(Option<String>, Option<String>)>> {
        self.ids
            .query_row(
                "SELECT student_number, student_name FROM student_ids WHERE sid = ?1",
                [sid],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
    }
}

/// Catalog id of a term, inserting it if unseen
fn ensure_term(conn: &Connection, term: &Term) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO terms (season, start_year, end_year) VALUES (?1, ?2, ?3)",
        params![term.season.as_str(), term.start_year, term.end_year],
    )?;
    conn.query_row(
        "SELECT tid FROM terms WHERE season = ?1 AND start_year = ?2 AND end_year = ?3",
        params![term.season.as_str(), term.start_year, term.end_year],
        |row| row.get(0),
    )
}

/// Catalog id of a course, inserting it if unseen
///
/// The first credit value seen for a course is the one kept.
fn ensure_course(conn: &Connection, course: &Course) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO courses (dept, number, credits) VALUES (?1, ?2, ?3)",
        params![course.dept, course.number, course.credit],
    )?;
    conn.query_row(
        "SELECT cid FROM courses WHERE dept = ?1 AND number = ?2",
        params![course.dept, course.number],
        |row| row.get(0),
    )
}
