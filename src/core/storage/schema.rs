//! Table definitions for the academic and identity databases

/// Academic database: terms, course catalog, students and per-term records
pub const MAIN_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS terms (
    tid INTEGER PRIMARY KEY AUTOINCREMENT,
    season TEXT NOT NULL,
    start_year INTEGER NOT NULL,
    end_year INTEGER NOT NULL,
    UNIQUE (season, start_year, end_year)
);
CREATE TABLE IF NOT EXISTS courses (
    cid INTEGER PRIMARY KEY AUTOINCREMENT,
    dept TEXT NOT NULL,
    number TEXT NOT NULL,
    credits REAL,
    UNIQUE (dept, number)
);
CREATE TABLE IF NOT EXISTS students (
    sid INTEGER PRIMARY KEY AUTOINCREMENT,
    cumulative_gpa REAL,
    english_req TEXT,
    classification TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS registrations (
    sid INTEGER NOT NULL REFERENCES students(sid),
    cid INTEGER NOT NULL REFERENCES courses(cid),
    tid INTEGER NOT NULL REFERENCES terms(tid),
    grade_point INTEGER,
    special_status TEXT
);
CREATE TABLE IF NOT EXISTS term_status (
    sid INTEGER NOT NULL REFERENCES students(sid),
    tid INTEGER NOT NULL REFERENCES terms(tid),
    standing TEXT,
    sessional_gpa REAL,
    credits_earned REAL,
    program TEXT
);
CREATE INDEX IF NOT EXISTS idx_registrations_sid ON registrations (sid);
CREATE INDEX IF NOT EXISTS idx_term_status_sid ON term_status (sid);
";

/// Identity database: maps anonymous ids to real-world identifiers
pub const ID_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS student_ids (
    sid INTEGER PRIMARY KEY,
    student_number TEXT,
    student_name TEXT
);
";
