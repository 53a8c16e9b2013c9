//! Repository for the `students` table.

use gradebook_core::student::StudentFilter;
use gradebook_core::types::DbId;

use crate::models::student::{CascadeDelete, CreateStudent, Student, StudentOption};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, age, major, gpa";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (name, email, age, major, gpa)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.age)
            .bind(&input.major)
            .bind(input.gpa)
            .fetch_one(pool)
            .await
    }

    /// Find a student by ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = ?1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a student with this ID exists.
    pub async fn exists(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE id = ?1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(found > 0)
    }

    /// List students matching `filter`, in id order.
    ///
    /// Name search uses `instr`, so it is case-sensitive and treats `%` and
    /// `_` literally.
    pub async fn list(pool: &DbPool, filter: &StudentFilter) -> Result<Vec<Student>, sqlx::Error> {
        match filter {
            StudentFilter::All => {
                let query = format!("SELECT {COLUMNS} FROM students ORDER BY id");
                sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
            }
            StudentFilter::NameContains(needle) => {
                let query =
                    format!("SELECT {COLUMNS} FROM students WHERE instr(name, ?1) > 0 ORDER BY id");
                sqlx::query_as::<_, Student>(&query)
                    .bind(needle)
                    .fetch_all(pool)
                    .await
            }
            StudentFilter::Major(major) => {
                let query = format!("SELECT {COLUMNS} FROM students WHERE major = ?1 ORDER BY id");
                sqlx::query_as::<_, Student>(&query)
                    .bind(major)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Distinct non-empty majors, alphabetically.
    pub async fn distinct_majors(pool: &DbPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT major FROM students
             WHERE major IS NOT NULL AND major <> ''
             ORDER BY major",
        )
        .fetch_all(pool)
        .await
    }

    /// `(id, name)` of every student, ordered by name.
    pub async fn list_options(pool: &DbPool) -> Result<Vec<StudentOption>, sqlx::Error> {
        sqlx::query_as::<_, StudentOption>("SELECT id, name FROM students ORDER BY name, id")
            .fetch_all(pool)
            .await
    }

    /// Number of students.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(pool)
            .await
    }

    /// Delete a student and every grade that references it, atomically.
    ///
    /// Grades go first, then the student. Returns `None` (and rolls back)
    /// when no student row matched.
    pub async fn delete_with_grades(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<CascadeDelete>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let grades_deleted = sqlx::query("DELETE FROM grades WHERE student_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let students_deleted = sqlx::query("DELETE FROM students WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if students_deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        tracing::debug!(student_id = id, grades_deleted, "Cascade delete committed");
        Ok(Some(CascadeDelete {
            grades_deleted,
            students_deleted,
        }))
    }
}
