//! Repository for the `grades` table.

use gradebook_core::grade::GradeFilter;
use gradebook_core::types::DbId;

use crate::models::grade::{CreateGrade, Grade, GradeView};
use crate::DbPool;

const COLUMNS: &str = "id, student_id, course, grade, semester, credits";

/// Provides CRUD operations for grades.
pub struct GradeRepo;

impl GradeRepo {
    /// Insert a new grade, returning the created row.
    ///
    /// Does not check that the student exists; the caller must.
    pub async fn create(pool: &DbPool, input: &CreateGrade) -> Result<Grade, sqlx::Error> {
        let query = format!(
            "INSERT INTO grades (student_id, course, grade, semester, credits)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(input.student_id)
            .bind(&input.course)
            .bind(input.grade.as_str())
            .bind(&input.semester)
            .bind(input.credits)
            .fetch_one(pool)
            .await
    }

    /// Find a grade by ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades WHERE id = ?1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List grades joined with student names, in grade id order.
    ///
    /// All present filters must match. Substring filters are case-sensitive.
    /// Grades whose student no longer exists are excluded by the join.
    pub async fn list(pool: &DbPool, filter: &GradeFilter) -> Result<Vec<GradeView>, sqlx::Error> {
        sqlx::query_as::<_, GradeView>(
            "SELECT g.id, g.student_id, s.name AS student_name, g.course, g.grade,
                    g.semester, g.credits
             FROM grades g
             JOIN students s ON g.student_id = s.id
             WHERE (?1 IS NULL OR instr(s.name, ?1) > 0)
               AND (?2 IS NULL OR instr(g.course, ?2) > 0)
               AND (?3 IS NULL OR g.semester = ?3)
             ORDER BY g.id",
        )
        .bind(filter.student_name.as_deref())
        .bind(filter.course.as_deref())
        .bind(filter.semester.as_deref())
        .fetch_all(pool)
        .await
    }

    /// List every grade recorded for one student.
    pub async fn list_by_student(pool: &DbPool, student_id: DbId) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades WHERE student_id = ?1 ORDER BY id");
        sqlx::query_as::<_, Grade>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Distinct semesters, alphabetically.
    pub async fn distinct_semesters(pool: &DbPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT semester FROM grades ORDER BY semester")
            .fetch_all(pool)
            .await
    }

    /// Distinct course names, alphabetically.
    pub async fn distinct_courses(pool: &DbPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT course FROM grades ORDER BY course")
            .fetch_all(pool)
            .await
    }

    /// Number of grades.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM grades")
            .fetch_one(pool)
            .await
    }

    /// Permanently delete a grade by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grades WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
