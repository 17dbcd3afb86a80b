use super::{professors, RegistryError, RegistryResult};
use crate::db::Database;
use crate::models::{Course, CourseWithProfessor};

pub fn list(db: &Database) -> RegistryResult<Vec<CourseWithProfessor>> {
    let sql = format!(
        "SELECT {}
         FROM courses c
         JOIN professors p ON p.professor_id = c.professor_id
         ORDER BY c.course_id",
        CourseWithProfessor::COLUMNS
    );
    Ok(db.select(&sql, [], CourseWithProfessor::from_row)?)
}

pub fn get(db: &Database, course_id: i64) -> RegistryResult<Course> {
    find(db, course_id)?.ok_or(RegistryError::NotFound("Course"))
}

pub fn find(db: &Database, course_id: i64) -> RegistryResult<Option<Course>> {
    let sql = format!(
        "SELECT {} FROM courses c WHERE c.course_id = ?",
        Course::COLUMNS
    );
    Ok(db.select_one(&sql, [course_id], Course::from_row)?)
}

/// Insert a course taught by an existing professor.
pub fn create(db: &Database, course_name: &str, professor_id: i64) -> RegistryResult<i64> {
    if professors::find(db, professor_id)?.is_none() {
        return Err(RegistryError::UnknownReference("Professor doesn't exist"));
    }

    let out = db.execute(
        "INSERT INTO courses(course_name, professor_id) VALUES(?, ?)",
        (course_name, professor_id),
    )?;

    tracing::debug!(course_id = out.last_insert_id, professor_id, "course created");
    Ok(out.last_insert_id)
}
