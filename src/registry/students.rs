use super::{RegistryError, RegistryResult};
use crate::db::Database;
use crate::models::Student;

const DUPLICATE_EMAIL: &str = "Student email already exists";

pub fn list(db: &Database) -> RegistryResult<Vec<Student>> {
    let sql = format!(
        "SELECT {} FROM students s ORDER BY s.student_id",
        Student::COLUMNS
    );
    Ok(db.select(&sql, [], Student::from_row)?)
}

pub fn get(db: &Database, student_id: i64) -> RegistryResult<Student> {
    find(db, student_id)?.ok_or(RegistryError::NotFound("Student"))
}

pub fn find(db: &Database, student_id: i64) -> RegistryResult<Option<Student>> {
    let sql = format!(
        "SELECT {} FROM students s WHERE s.student_id = ?",
        Student::COLUMNS
    );
    Ok(db.select_one(&sql, [student_id], Student::from_row)?)
}

pub fn find_by_email(db: &Database, email: &str) -> RegistryResult<Option<Student>> {
    let sql = format!("SELECT {} FROM students s WHERE s.email = ?", Student::COLUMNS);
    Ok(db.select_one(&sql, [email], Student::from_row)?)
}

/// Insert a student and return the generated id.
pub fn create(db: &Database, name: &str, email: &str) -> RegistryResult<i64> {
    if find_by_email(db, email)?.is_some() {
        return Err(RegistryError::Conflict(DUPLICATE_EMAIL.to_string()));
    }

    let out = db
        .execute(
            "INSERT INTO students(name, email) VALUES(?, ?)",
            (name, email),
        )
        .map_err(|e| RegistryError::from_insert(e, DUPLICATE_EMAIL))?;

    tracing::debug!(student_id = out.last_insert_id, "student created");
    Ok(out.last_insert_id)
}
