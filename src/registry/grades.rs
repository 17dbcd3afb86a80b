use serde::Serialize;

use super::{RegistryError, RegistryResult};
use crate::db::Database;
use crate::models::{CourseAverage, EnrollmentGrade, StudentGrade};

const DUPLICATE_GRADE: &str = "Grade was submitted concurrently for this enrollment";

/// What a grade submission did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GradeOutcome {
    Created { grade_id: i64 },
    Updated { updated: bool },
}

/// Record a grade for a student in a course.
///
/// Looks up the enrollment together with any grade it already has, then
/// inserts a new grade row or updates the existing one in place. `grade` is
/// expected to be range-checked by the caller; the table's CHECK constraint
/// rejects anything outside 0..=100 regardless.
pub fn upsert(
    db: &Database,
    course_id: i64,
    student_id: i64,
    grade: i64,
) -> RegistryResult<GradeOutcome> {
    let current = db.select_one(
        "SELECT e.enrollment_id, g.grade_id
         FROM enrollments e
         LEFT JOIN grades g ON g.enrollment_id = e.enrollment_id
         WHERE e.course_id = ? AND e.student_id = ?
         LIMIT 1",
        [course_id, student_id],
        EnrollmentGrade::from_row,
    )?;

    let Some(current) = current else {
        return Err(RegistryError::NotEnrolled);
    };

    match current.grade_id {
        None => {
            let out = db
                .execute(
                    "INSERT INTO grades(enrollment_id, grade) VALUES(?, ?)",
                    [current.enrollment_id, grade],
                )
                .map_err(|e| RegistryError::from_insert(e, DUPLICATE_GRADE))?;
            tracing::debug!(
                grade_id = out.last_insert_id,
                enrollment_id = current.enrollment_id,
                "grade created"
            );
            Ok(GradeOutcome::Created {
                grade_id: out.last_insert_id,
            })
        }
        Some(grade_id) => {
            let out = db.execute(
                "UPDATE grades SET grade = ? WHERE grade_id = ?",
                [grade, grade_id],
            )?;
            tracing::debug!(grade_id, rows = out.rows_affected, "grade updated");
            Ok(GradeOutcome::Updated {
                updated: out.rows_affected == 1,
            })
        }
    }
}

/// Every enrolled student of a course with their grade, ungraded ones
/// included with null grade fields.
pub fn list(db: &Database, course_id: i64) -> RegistryResult<Vec<StudentGrade>> {
    let sql = format!(
        "SELECT {}
         FROM enrollments e
         JOIN students s ON s.student_id = e.student_id
         LEFT JOIN grades g ON g.enrollment_id = e.enrollment_id
         WHERE e.course_id = ?
         ORDER BY e.enrollment_id",
        StudentGrade::COLUMNS
    );
    Ok(db.select(&sql, [course_id], StudentGrade::from_row)?)
}

pub fn average(db: &Database, course_id: i64) -> RegistryResult<CourseAverage> {
    let average = db.select_one(
        "SELECT AVG(g.grade)
         FROM grades g
         JOIN enrollments e ON e.enrollment_id = g.enrollment_id
         WHERE e.course_id = ?",
        [course_id],
        |row| row.get::<_, Option<f64>>(0),
    )?;
    Ok(CourseAverage {
        average: average.flatten(),
    })
}
