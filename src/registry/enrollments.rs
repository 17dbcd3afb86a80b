use super::{courses, students, RegistryError, RegistryResult};
use crate::db::Database;
use crate::models::Student;

const ALREADY_ENROLLED: &str = "Student is already enrolled";

/// Enroll a student in a course and return the enrollment id.
///
/// Both rows must exist and the pair must not be enrolled yet. The checks and
/// the insert are separate statements; the `UNIQUE(student_id, course_id)`
/// constraint catches a request that slips in between.
pub fn enroll(db: &Database, course_id: i64, student_id: i64) -> RegistryResult<i64> {
    if students::find(db, student_id)?.is_none() {
        return Err(RegistryError::UnknownReference("Student doesn't exist"));
    }
    if courses::find(db, course_id)?.is_none() {
        return Err(RegistryError::UnknownReference("Course doesn't exist"));
    }

    let existing = db.select_one(
        "SELECT enrollment_id FROM enrollments WHERE course_id = ? AND student_id = ?",
        [course_id, student_id],
        |row| row.get::<_, i64>(0),
    )?;
    if existing.is_some() {
        return Err(RegistryError::Conflict(ALREADY_ENROLLED.to_string()));
    }

    let out = db
        .execute(
            "INSERT INTO enrollments(student_id, course_id) VALUES(?, ?)",
            [student_id, course_id],
        )
        .map_err(|e| RegistryError::from_insert(e, ALREADY_ENROLLED))?;

    tracing::debug!(enrollment_id = out.last_insert_id, course_id, student_id, "student enrolled");
    Ok(out.last_insert_id)
}

/// Students enrolled in a course, in enrollment order.
pub fn students(db: &Database, course_id: i64) -> RegistryResult<Vec<Student>> {
    let sql = format!(
        "SELECT {}
         FROM enrollments e
         JOIN students s ON s.student_id = e.student_id
         WHERE e.course_id = ?
         ORDER BY e.enrollment_id",
        Student::COLUMNS
    );
    Ok(db.select(&sql, [course_id], Student::from_row)?)
}
