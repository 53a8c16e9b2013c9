//! Student listing, creation and cascading deletion.

use gradebook_core::error::CoreError;
use gradebook_core::student::{self, StudentFields, StudentFilter, StudentSummary};
use gradebook_core::types::DbId;
use gradebook_db::models::student::{CascadeDelete, Student};
use gradebook_db::repositories::StudentRepo;
use gradebook_db::DbPool;

use crate::error::{AppError, AppResult};

pub struct StudentService {
    pool: DbPool,
}

impl StudentService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Students matching `filter`, in id order.
    pub async fn list(&self, filter: &StudentFilter) -> AppResult<Vec<Student>> {
        let students = StudentRepo::list(&self.pool, filter).await?;
        tracing::debug!(count = students.len(), ?filter, "Listed students");
        Ok(students)
    }

    /// Validate and insert a student.
    ///
    /// Fails with [`CoreError::Validation`] carrying every violated
    /// constraint; nothing is written in that case.
    pub async fn create(&self, fields: &StudentFields) -> AppResult<Student> {
        let input = student::validate_student(fields).map_err(|errors| {
            tracing::warn!(%errors, "Rejected student submission");
            CoreError::from(errors)
        })?;
        let created = StudentRepo::create(&self.pool, &input).await?;
        tracing::info!(id = created.id, name = %created.name, "Student created");
        Ok(created)
    }

    /// Delete a student together with all of its grades.
    ///
    /// Fails with [`CoreError::NotFound`] when no student row was removed,
    /// in which case nothing is changed.
    pub async fn delete(&self, id: DbId) -> AppResult<CascadeDelete> {
        let outcome = StudentRepo::delete_with_grades(&self.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Student",
                id,
            }))?;
        tracing::info!(
            id,
            grades_deleted = outcome.grades_deleted,
            "Student deleted"
        );
        Ok(outcome)
    }

    /// Every distinct non-empty major, for the filter dropdown.
    pub async fn distinct_majors(&self) -> AppResult<Vec<String>> {
        Ok(StudentRepo::distinct_majors(&self.pool).await?)
    }

    /// Headline numbers over an already-fetched listing.
    pub fn summary(students: &[Student]) -> StudentSummary {
        student::summarize_students(students.iter().map(|s| (s.gpa, s.major.as_deref())))
    }
}
