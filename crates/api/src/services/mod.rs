//! Entity services.
//!
//! A service owns a handle to the storage pool and combines core
//! validation with repository calls. Handlers construct one per request
//! from [`AppState`](crate::state::AppState).

pub mod grade;
pub mod student;

pub use grade::GradeService;
pub use student::StudentService;
