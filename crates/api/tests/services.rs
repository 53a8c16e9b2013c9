//! Service-level tests: the operations behind the pages, without HTTP.

mod common;

use assert_matches::assert_matches;
use gradebook_api::error::AppError;
use gradebook_api::services::{GradeService, StudentService};
use gradebook_core::error::CoreError;
use gradebook_core::grade::{GradeFields, GradeFilter, LetterGrade};
use gradebook_core::student::{StudentFields, StudentFilter};
use sqlx::SqlitePool;

fn student_fields(name: &str, email: &str) -> StudentFields {
    StudentFields {
        name: name.to_string(),
        email: email.to_string(),
        age: "21".to_string(),
        major: "Computer Science".to_string(),
        gpa: "3.75".to_string(),
    }
}

fn grade_fields(student_id: i64, course: &str, grade: &str) -> GradeFields {
    GradeFields {
        student_id: student_id.to_string(),
        course: course.to_string(),
        grade: grade.to_string(),
        semester: "Fall 2024".to_string(),
        credits: String::new(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_student_is_listed_once(pool: SqlitePool) {
    let service = StudentService::new(pool);
    let created = service
        .create(&student_fields("Grace Hopper", "grace@navy.mil"))
        .await
        .unwrap();
    assert_eq!(created.age, Some(21));
    assert_eq!(created.gpa, Some(3.75));

    let listed = service.list(&StudentFilter::All).await.unwrap();
    assert_eq!(listed.iter().filter(|s| s.id == created.id).count(), 1);
    assert_eq!(listed[0], created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_student_is_not_written(pool: SqlitePool) {
    let service = StudentService::new(pool.clone());
    let result = service.create(&student_fields("G", "grace")).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(errors))) => {
        assert_eq!(errors.len(), 2);
    });
    assert_eq!(common::count(&pool, "students").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_missing_student_is_not_found(pool: SqlitePool) {
    let service = StudentService::new(pool);
    let result = service.delete(404).await;
    assert_matches!(
        result,
        Err(AppError::Core(CoreError::NotFound { entity: "Student", id: 404 }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascades_to_grades(pool: SqlitePool) {
    let students = StudentService::new(pool.clone());
    let grades = GradeService::new(pool.clone());

    let alice = students
        .create(&student_fields("Alice", "alice@email.com"))
        .await
        .unwrap();
    grades
        .create(&grade_fields(alice.id, "Genetics", "A"))
        .await
        .unwrap();
    grades
        .create(&grade_fields(alice.id, "Chemistry", "B-"))
        .await
        .unwrap();

    let outcome = students.delete(alice.id).await.unwrap();
    assert_eq!(outcome.students_deleted, 1);
    assert_eq!(outcome.grades_deleted, 2);
    assert!(grades.list(&GradeFilter::default()).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn grade_requires_existing_student(pool: SqlitePool) {
    let service = GradeService::new(pool.clone());
    let result = service.create(&grade_fields(12, "Genetics", "A")).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(errors))) => {
        assert!(errors.contains("Student does not exist"));
    });
    assert_eq!(common::count(&pool, "grades").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_filter_matches_substring(pool: SqlitePool) {
    let alice = common::insert_student(&pool, "Alice", "CS").await;
    let bob = common::insert_student(&pool, "Bob", "Math").await;
    let service = GradeService::new(pool);
    service
        .create(&grade_fields(alice, "Data Structures", "A"))
        .await
        .unwrap();
    service
        .create(&grade_fields(bob, "Calculus I", "B"))
        .await
        .unwrap();

    let filter = GradeFilter::from_params(None, Some("Data"), None);
    let listed = service.list(&filter).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].student_name, "Alice");
    assert_eq!(listed[0].credits, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_follow_the_listing(pool: SqlitePool) {
    let alice = common::insert_student(&pool, "Alice", "CS").await;
    for letter in ["A", "A", "B", "F"] {
        common::insert_grade(&pool, alice, "Genetics", letter).await;
    }
    let service = GradeService::new(pool);
    let listed = service.list(&GradeFilter::default()).await.unwrap();
    let stats = GradeService::aggregate_stats(&listed);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.total_credits, 12);
    assert_eq!(stats.histogram.get(LetterGrade::A), 2);
    assert_eq!(stats.histogram.get(LetterGrade::B), 1);
    assert_eq!(stats.histogram.get(LetterGrade::F), 1);
    assert_eq!(stats.histogram.get(LetterGrade::CPlus), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_delete_restores_the_listing(pool: SqlitePool) {
    common::insert_student(&pool, "Alice", "CS").await;
    let service = StudentService::new(pool);
    let before = service.list(&StudentFilter::All).await.unwrap();

    let created = service
        .create(&student_fields("Grace Hopper", "grace@navy.mil"))
        .await
        .unwrap();
    assert_eq!(service.list(&StudentFilter::All).await.unwrap().len(), before.len() + 1);

    service.delete(created.id).await.unwrap();
    assert_eq!(service.list(&StudentFilter::All).await.unwrap(), before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filtered_grade_disappears_after_delete(pool: SqlitePool) {
    let alice = common::insert_student(&pool, "Alice", "CS").await;
    common::insert_student(&pool, "Bob", "Math").await;
    let service = GradeService::new(pool);

    let created = service
        .create(&GradeFields {
            credits: "4".to_string(),
            ..grade_fields(alice, "Data Structures", "A-")
        })
        .await
        .unwrap();

    let filter = GradeFilter::from_params(None, Some("Data"), None);
    let listed = service.list(&filter).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].student_name, "Alice");
    assert_eq!(listed[0].grade, "A-");
    assert_eq!(listed[0].semester, "Fall 2024");
    assert_eq!(listed[0].credits, 4);

    service.delete(created.id).await.unwrap();
    assert!(service.list(&filter).await.unwrap().is_empty());
}
