pub mod core;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod professors;
pub mod students;
