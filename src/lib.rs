//! University enrollment records over HTTP: students, professors, courses,
//! enrollments and grades, stored in SQLite.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod registry;
pub mod schema;
pub mod server;
