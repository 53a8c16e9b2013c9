//! First-run sample data.

use crate::DbPool;

/// `app_meta` key recording that the first-run seed has been decided.
const SEEDED_MARKER: &str = "sample_data_seeded";

/// `(id, name, email, age, major, gpa)`
const SAMPLE_STUDENTS: [(i64, &str, &str, i64, &str, f64); 10] = [
    (1, "Alice Johnson", "alice@email.com", 20, "Computer Science", 3.8),
    (2, "Bob Smith", "bob@email.com", 22, "Mathematics", 3.5),
    (3, "Charlie Brown", "charlie@email.com", 21, "Physics", 3.9),
    (4, "Diana Prince", "diana@email.com", 19, "Engineering", 3.7),
    (5, "Edward Norton", "edward@email.com", 23, "Computer Science", 3.2),
    (6, "Fiona Apple", "fiona@email.com", 20, "Biology", 3.6),
    (7, "George Lucas", "george@email.com", 22, "Film Studies", 3.4),
    (8, "Hannah Montana", "hannah@email.com", 21, "Music", 3.9),
    (9, "Ian McKellen", "ian@email.com", 24, "Theater", 3.1),
    (10, "Julia Roberts", "julia@email.com", 20, "Chemistry", 3.8),
];

/// `(id, student_id, course, grade, semester, credits)`
const SAMPLE_GRADES: [(i64, i64, &str, &str, &str, i64); 21] = [
    (1, 1, "Introduction to Programming", "A", "Fall 2024", 4),
    (2, 1, "Data Structures", "A-", "Fall 2024", 4),
    (3, 1, "Web Development", "B+", "Spring 2024", 3),
    (4, 2, "Calculus I", "B", "Fall 2024", 4),
    (5, 2, "Linear Algebra", "A-", "Fall 2024", 3),
    (6, 3, "Quantum Mechanics", "A", "Fall 2024", 4),
    (7, 3, "Classical Mechanics", "A", "Spring 2024", 4),
    (8, 4, "Thermodynamics", "B+", "Fall 2024", 3),
    (9, 4, "Circuit Design", "A-", "Fall 2024", 4),
    (10, 5, "Operating Systems", "C+", "Fall 2024", 4),
    (11, 5, "Computer Networks", "B", "Spring 2024", 3),
    (12, 6, "Molecular Biology", "A-", "Fall 2024", 4),
    (13, 6, "Genetics", "A", "Spring 2024", 4),
    (14, 7, "Film History", "B+", "Fall 2024", 3),
    (15, 7, "Screenwriting", "B", "Spring 2024", 3),
    (16, 8, "Music Theory", "A", "Fall 2024", 4),
    (17, 8, "Performance Art", "A", "Fall 2024", 2),
    (18, 9, "Shakespeare Studies", "C", "Fall 2024", 3),
    (19, 9, "Modern Drama", "B-", "Spring 2024", 3),
    (20, 10, "Organic Chemistry", "A-", "Fall 2024", 4),
    (21, 10, "Analytical Chemistry", "A", "Spring 2024", 3),
];

/// Outcome of [`seed_if_first_run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seeding already ran, or the store already held students.
    Skipped,
    Seeded { students: usize, grades: usize },
}

/// Insert the sample students and grades on the first run against a store.
///
/// A marker row in `app_meta` is written alongside the sample rows, so a
/// store whose students were all deleted later is not reseeded. A store
/// that already holds students gets the marker without any sample rows.
/// Everything is written in one transaction.
pub async fn seed_if_first_run(pool: &DbPool) -> Result<SeedOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let marked: Option<String> = sqlx::query_scalar("SELECT value FROM app_meta WHERE key = ?1")
        .bind(SEEDED_MARKER)
        .fetch_optional(&mut *tx)
        .await?;
    if marked.is_some() {
        return Ok(SeedOutcome::Skipped);
    }

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        mark_seeded(&mut tx, "existing").await?;
        tx.commit().await?;
        return Ok(SeedOutcome::Skipped);
    }

    for (id, name, email, age, major, gpa) in SAMPLE_STUDENTS {
        sqlx::query(
            "INSERT INTO students (id, name, email, age, major, gpa) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(age)
        .bind(major)
        .bind(gpa)
        .execute(&mut *tx)
        .await?;
    }

    for (id, student_id, course, grade, semester, credits) in SAMPLE_GRADES {
        sqlx::query(
            "INSERT INTO grades (id, student_id, course, grade, semester, credits)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(id)
        .bind(student_id)
        .bind(course)
        .bind(grade)
        .bind(semester)
        .bind(credits)
        .execute(&mut *tx)
        .await?;
    }

    mark_seeded(&mut tx, "sample").await?;
    tx.commit().await?;
    tracing::info!(
        students = SAMPLE_STUDENTS.len(),
        grades = SAMPLE_GRADES.len(),
        "Seeded sample data"
    );
    Ok(SeedOutcome::Seeded {
        students: SAMPLE_STUDENTS.len(),
        grades: SAMPLE_GRADES.len(),
    })
}

async fn mark_seeded(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO app_meta (key, value) VALUES (?1, ?2)")
        .bind(SEEDED_MARKER)
        .bind(value)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
