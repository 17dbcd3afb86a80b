#![allow(dead_code)]

use registrard::config::DatabaseSettings;
use registrard::db::Database;
use registrard::schema;
use tempfile::TempDir;

/// Fresh store in its own temp directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn empty_store() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = Database::new(&DatabaseSettings {
        path: dir.path().join("registrar.sqlite3"),
        ..DatabaseSettings::default()
    });
    (dir, db)
}

pub fn bootstrapped_store() -> (TempDir, Database) {
    let (dir, db) = empty_store();
    let report = schema::bootstrap(&db);
    assert!(report.is_complete(), "bootstrap failed: {:?}", report);
    (dir, db)
}

pub fn count(db: &Database, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    db.select_one(&sql, [], |row| row.get::<_, i64>(0))
        .expect("count query")
        .unwrap_or(0)
}
