use rusqlite::{ffi, Connection, ErrorCode, OptionalExtension, Params, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseSettings;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by any statement run through [`Database`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("could not open database: {0}")]
    Open(String),

    /// UNIQUE or PRIMARY KEY constraint rejected the statement.
    #[error("{0}")]
    Unique(String),

    /// Foreign-key, check or not-null constraint rejected the statement.
    #[error("{0}")]
    Constraint(String),

    #[error("{0}")]
    Query(String),
}

impl StoreError {
    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint(_) | StoreError::Unique(_))
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, StoreError::Unique(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(
                ffi::Error {
                    code: ErrorCode::ConstraintViolation,
                    extended_code,
                },
                _,
            ) => match *extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    StoreError::Unique(e.to_string())
                }
                _ => StoreError::Constraint(e.to_string()),
            },
            _ => StoreError::Query(e.to_string()),
        }
    }
}

/// Result of an INSERT/UPDATE/DDL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub last_insert_id: i64,
    pub rows_affected: usize,
}

/// Query executor over a single store file.
///
/// Every call opens its own connection and drops it before returning, on the
/// error path as well. There is no pooling and no transaction spans more than
/// one statement.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    schema: String,
    busy_timeout: Duration,
}

impl Database {
    pub fn new(settings: &DatabaseSettings) -> Self {
        Self {
            path: settings.path.clone(),
            schema: settings.schema.clone(),
            busy_timeout: Duration::from_millis(settings.busy_timeout_ms),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Catalog name used for table lookups (`main` for the primary file).
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn connect(&self) -> StoreResult<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Open(e.to_string()))?;
            }
        }
        let conn = Connection::open(&self.path).map_err(|e| StoreError::Open(e.to_string()))?;
        conn.busy_timeout(self.busy_timeout)
            .map_err(|e| StoreError::Open(e.to_string()))?;
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StoreError::Open(e.to_string()))?;
        Ok(conn)
    }

    pub fn select<T, P, F>(&self, sql: &str, params: P, map_row: F) -> StoreResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn select_one<T, P, F>(&self, sql: &str, params: P, map_row: F) -> StoreResult<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connect()?;
        let row = conn.query_row(sql, params, map_row).optional()?;
        Ok(row)
    }

    pub fn execute<P: Params>(&self, sql: &str, params: P) -> StoreResult<WriteOutcome> {
        let conn = self.connect()?;
        let rows_affected = conn.execute(sql, params)?;
        Ok(WriteOutcome {
            last_insert_id: conn.last_insert_rowid(),
            rows_affected,
        })
    }

    pub fn execute_batch(&self, sql: &str) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// True when exactly one catalog row matches (schema, table).
    pub fn table_exists(&self, table: &str) -> StoreResult<bool> {
        let rows = self.select(
            "SELECT name
             FROM pragma_table_list
             WHERE schema = ? AND name = ? AND type = 'table'
             LIMIT 1",
            (&self.schema, table),
            |row| row.get::<_, String>(0),
        )?;
        Ok(rows.len() == 1)
    }
}
