//! Grade listing, creation, deletion and aggregation.

use gradebook_core::error::CoreError;
use gradebook_core::grade::{self, GradeFields, GradeFilter, GradeStats};
use gradebook_core::types::DbId;
use gradebook_db::models::grade::{Grade, GradeView};
use gradebook_db::models::student::StudentOption;
use gradebook_db::repositories::{GradeRepo, StudentRepo};
use gradebook_db::DbPool;

use crate::error::{AppError, AppResult};

pub struct GradeService {
    pool: DbPool,
}

impl GradeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Grades matching every present predicate of `filter`, in id order.
    pub async fn list(&self, filter: &GradeFilter) -> AppResult<Vec<GradeView>> {
        let grades = GradeRepo::list(&self.pool, filter).await?;
        tracing::debug!(count = grades.len(), ?filter, "Listed grades");
        Ok(grades)
    }

    /// Validate and insert a grade.
    ///
    /// The referenced student must exist at insert time. Fails with
    /// [`CoreError::Validation`] carrying every violated constraint.
    pub async fn create(&self, fields: &GradeFields) -> AppResult<Grade> {
        let student_exists = match grade::parse_student_id(&fields.student_id) {
            Some(id) => StudentRepo::exists(&self.pool, id).await?,
            None => false,
        };

        let input = grade::validate_grade(fields, student_exists).map_err(|errors| {
            tracing::warn!(%errors, "Rejected grade submission");
            CoreError::from(errors)
        })?;
        let created = GradeRepo::create(&self.pool, &input).await?;
        tracing::info!(
            id = created.id,
            student_id = created.student_id,
            course = %created.course,
            "Grade created"
        );
        Ok(created)
    }

    /// Delete one grade. Fails with [`CoreError::NotFound`] when no row matched.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !GradeRepo::delete(&self.pool, id).await? {
            return Err(AppError::Core(CoreError::NotFound { entity: "Grade", id }));
        }
        tracing::info!(id, "Grade deleted");
        Ok(())
    }

    pub async fn distinct_semesters(&self) -> AppResult<Vec<String>> {
        Ok(GradeRepo::distinct_semesters(&self.pool).await?)
    }

    pub async fn distinct_courses(&self) -> AppResult<Vec<String>> {
        Ok(GradeRepo::distinct_courses(&self.pool).await?)
    }

    /// Students for the grade form's picker, ordered by name.
    pub async fn student_options(&self) -> AppResult<Vec<StudentOption>> {
        Ok(StudentRepo::list_options(&self.pool).await?)
    }

    /// Totals and letter histogram over an already-fetched listing.
    pub fn aggregate_stats(grades: &[GradeView]) -> GradeStats {
        grade::aggregate_grade_stats(grades.iter().map(|g| (g.grade.as_str(), g.credits)))
    }
}
