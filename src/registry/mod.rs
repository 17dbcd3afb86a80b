//! Registry operations, one module per entity family.
//!
//! Every operation is synchronous and issues its statements one after the
//! other through [`Database`](crate::db::Database); none of them run inside a
//! transaction. Callers on the async side move them onto a blocking worker.

mod error;

pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod professors;
pub mod students;

pub use error::{RegistryError, RegistryResult};
