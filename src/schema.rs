//! Startup schema bootstrap.
//!
//! Each registry table is checked against the catalog and created when
//! missing. Tables are visited in a fixed order so every foreign key points at
//! a table that already exists: courses need professors, enrollments need
//! students and courses, grades need enrollments.

use crate::db::{Database, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Students,
    Professors,
    Courses,
    Enrollments,
    Grades,
}

impl Table {
    /// Creation order.
    pub const ALL: [Table; 5] = [
        Table::Students,
        Table::Professors,
        Table::Courses,
        Table::Enrollments,
        Table::Grades,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Students => "students",
            Table::Professors => "professors",
            Table::Courses => "courses",
            Table::Enrollments => "enrollments",
            Table::Grades => "grades",
        }
    }

    pub fn create_sql(self) -> &'static str {
        match self {
            Table::Students => {
                "CREATE TABLE students(
                    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE COLLATE NOCASE
                )"
            }
            Table::Professors => {
                "CREATE TABLE professors(
                    professor_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE COLLATE NOCASE
                )"
            }
            Table::Courses => {
                "CREATE TABLE courses(
                    course_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    course_name TEXT NOT NULL,
                    professor_id INTEGER NOT NULL,
                    FOREIGN KEY(professor_id) REFERENCES professors(professor_id)
                )"
            }
            Table::Enrollments => {
                "CREATE TABLE enrollments(
                    enrollment_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    student_id INTEGER NOT NULL,
                    course_id INTEGER NOT NULL,
                    FOREIGN KEY(student_id) REFERENCES students(student_id),
                    FOREIGN KEY(course_id) REFERENCES courses(course_id),
                    UNIQUE(student_id, course_id)
                )"
            }
            // One grade per enrollment; concurrent first submissions collide
            // here instead of producing two rows.
            Table::Grades => {
                "CREATE TABLE grades(
                    grade_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    enrollment_id INTEGER NOT NULL UNIQUE,
                    grade REAL NOT NULL CHECK(grade >= 0 AND grade <= 100),
                    FOREIGN KEY(enrollment_id) REFERENCES enrollments(enrollment_id)
                )"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    AlreadyPresent,
    Created,
    CreationFailed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub tables: Vec<(Table, TableState)>,
}

impl BootstrapReport {
    /// Tables created by this run, in creation order.
    pub fn created(&self) -> Vec<Table> {
        self.tables
            .iter()
            .filter(|(_, s)| *s == TableState::Created)
            .map(|(t, _)| *t)
            .collect()
    }

    pub fn created_count(&self) -> usize {
        self.created().len()
    }

    pub fn failures(&self) -> Vec<(Table, &str)> {
        self.tables
            .iter()
            .filter_map(|(t, s)| match s {
                TableState::CreationFailed(msg) => Some((*t, msg.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }
}

/// A table whose presence could not be confirmed is still created; if it
/// does exist after all, the CREATE fails and is recorded as such.
fn settle(db: &Database, table: Table, present: StoreResult<bool>) -> TableState {
    match present {
        Ok(true) => return TableState::AlreadyPresent,
        Ok(false) => {}
        Err(e) => {
            tracing::warn!(table = table.name(), error = %e, "table lookup failed, creating anyway");
        }
    }
    match db.execute_batch(table.create_sql()) {
        Ok(()) => {
            tracing::debug!(table = table.name(), "created table");
            TableState::Created
        }
        Err(e) => {
            tracing::error!(table = table.name(), error = %e, "There was an issue creating the table");
            TableState::CreationFailed(e.to_string())
        }
    }
}

/// Create whichever registry tables are missing.
///
/// Best effort: a failed table is logged and recorded, and the remaining
/// tables are still attempted.
pub fn bootstrap(db: &Database) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    for table in Table::ALL {
        let state = settle(db, table, db.table_exists(table.name()));
        report.tables.push((table, state));
    }

    tracing::info!(
        created = report.created_count(),
        schema = db.schema(),
        "{} Tables Created",
        report.created_count()
    );
    report
}
