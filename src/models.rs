//! Row shapes returned by the registry, decoded straight from query rows.
//!
//! Each `COLUMNS` constant lists the select list its `from_row` expects, in
//! order.

use rusqlite::Row;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
    pub email: String,
}

impl Student {
    pub const COLUMNS: &'static str = "s.student_id, s.name, s.email";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            student_id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Professor {
    pub professor_id: i64,
    pub name: String,
    pub email: String,
}

impl Professor {
    pub const COLUMNS: &'static str = "p.professor_id, p.name, p.email";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            professor_id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub professor_id: i64,
}

impl Course {
    pub const COLUMNS: &'static str = "c.course_id, c.course_name, c.professor_id";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            course_id: row.get(0)?,
            course_name: row.get(1)?,
            professor_id: row.get(2)?,
        })
    }
}

/// Course joined with the professor teaching it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseWithProfessor {
    pub course_id: i64,
    pub course_name: String,
    pub professor_id: i64,
    pub name: String,
    pub email: String,
}

impl CourseWithProfessor {
    pub const COLUMNS: &'static str = "c.course_id, c.course_name, c.professor_id, p.name, p.email";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            course_id: row.get(0)?,
            course_name: row.get(1)?,
            professor_id: row.get(2)?,
            name: row.get(3)?,
            email: row.get(4)?,
        })
    }
}

/// Enrolled student with their grade for one course, if graded yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentGrade {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub enrollment_id: i64,
    pub grade_id: Option<i64>,
    pub grade: Option<f64>,
}

impl StudentGrade {
    pub const COLUMNS: &'static str =
        "s.student_id, s.name, s.email, e.enrollment_id, g.grade_id, g.grade";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            student_id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            enrollment_id: row.get(3)?,
            grade_id: row.get(4)?,
            grade: row.get(5)?,
        })
    }
}

/// Enrollment lookup used by the grade upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentGrade {
    pub enrollment_id: i64,
    pub grade_id: Option<i64>,
}

impl EnrollmentGrade {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            enrollment_id: row.get(0)?,
            grade_id: row.get(1)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseAverage {
    /// `None` when the course has no grades yet.
    pub average: Option<f64>,
}
