//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument.

pub mod grade_repo;
pub mod student_repo;

pub use grade_repo::GradeRepo;
pub use student_repo::StudentRepo;
