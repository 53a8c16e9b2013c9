#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use url::form_urlencoded;

use gradebook_api::app::build_app;
use gradebook_api::config::ServerConfig;
use gradebook_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        request_timeout_secs: 30,
        seed_sample_data: false,
    }
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_app(test_state(pool))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST an `application/x-www-form-urlencoded` body built from `fields`.
pub async fn post_form(app: Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert a student directly, returning its id.
pub async fn insert_student(pool: &SqlitePool, name: &str, major: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO students (name, email, age, major, gpa) VALUES (?1, ?2, 20, ?3, 3.5) RETURNING id",
    )
    .bind(name)
    .bind(format!("{}@email.com", name.to_lowercase()))
    .bind(major)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a grade directly, returning its id.
pub async fn insert_grade(pool: &SqlitePool, student_id: i64, course: &str, grade: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO grades (student_id, course, grade, semester, credits) \
         VALUES (?1, ?2, ?3, 'Fall 2024', 3) RETURNING id",
    )
    .bind(student_id)
    .bind(course)
    .bind(grade)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
