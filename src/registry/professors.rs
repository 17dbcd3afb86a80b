use super::{RegistryError, RegistryResult};
use crate::db::Database;
use crate::models::{Course, Professor};

const DUPLICATE_EMAIL: &str = "Professor email already exists";

pub fn list(db: &Database) -> RegistryResult<Vec<Professor>> {
    let sql = format!(
        "SELECT {} FROM professors p ORDER BY p.professor_id",
        Professor::COLUMNS
    );
    Ok(db.select(&sql, [], Professor::from_row)?)
}

pub fn get(db: &Database, professor_id: i64) -> RegistryResult<Professor> {
    find(db, professor_id)?.ok_or(RegistryError::NotFound("Professor"))
}

pub fn find(db: &Database, professor_id: i64) -> RegistryResult<Option<Professor>> {
    let sql = format!(
        "SELECT {} FROM professors p WHERE p.professor_id = ?",
        Professor::COLUMNS
    );
    Ok(db.select_one(&sql, [professor_id], Professor::from_row)?)
}

pub fn create(db: &Database, name: &str, email: &str) -> RegistryResult<i64> {
    let sql = format!("SELECT {} FROM professors p WHERE p.email = ?", Professor::COLUMNS);
    if db.select_one(&sql, [email], Professor::from_row)?.is_some() {
        return Err(RegistryError::Conflict(DUPLICATE_EMAIL.to_string()));
    }

    let out = db
        .execute(
            "INSERT INTO professors(name, email) VALUES(?, ?)",
            (name, email),
        )
        .map_err(|e| RegistryError::from_insert(e, DUPLICATE_EMAIL))?;

    tracing::debug!(professor_id = out.last_insert_id, "professor created");
    Ok(out.last_insert_id)
}

/// Courses taught by one professor. Unknown professors yield an empty list.
pub fn courses(db: &Database, professor_id: i64) -> RegistryResult<Vec<Course>> {
    let sql = format!(
        "SELECT {} FROM courses c WHERE c.professor_id = ? ORDER BY c.course_id",
        Course::COLUMNS
    );
    Ok(db.select(&sql, [professor_id], Course::from_row)?)
}
