//! Student entity model and DTOs.

use gradebook_core::student::NewStudent;
use gradebook_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A student row from the `students` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    pub major: Option<String>,
    pub gpa: Option<f64>,
}

/// DTO for inserting a student.
pub type CreateStudent = NewStudent;

/// `(id, name)` pair for student pickers.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StudentOption {
    pub id: DbId,
    pub name: String,
}

/// Rows removed by a cascading student delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeDelete {
    pub grades_deleted: u64,
    pub students_deleted: u64,
}
