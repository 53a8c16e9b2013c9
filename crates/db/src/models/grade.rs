//! Grade entity model and DTOs.

use gradebook_core::grade::NewGrade;
use gradebook_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A grade row from the `grades` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Grade {
    pub id: DbId,
    pub student_id: DbId,
    pub course: String,
    /// Stored as the letter text (`"A-"`, `"B+"`, ...).
    pub grade: String,
    pub semester: String,
    pub credits: i64,
}

/// A grade joined with its student's name, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct GradeView {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub course: String,
    pub grade: String,
    pub semester: String,
    pub credits: i64,
}

/// DTO for inserting a grade.
pub type CreateGrade = NewGrade;
