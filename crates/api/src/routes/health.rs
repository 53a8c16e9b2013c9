//! `GET /health`: liveness plus the size of the gradebook.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use gradebook_db::repositories::{GradeRepo, StudentRepo};
use gradebook_db::DbPool;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Absent when the store cannot be queried.
    pub records: Option<RecordCounts>,
}

#[derive(Debug, Serialize)]
pub struct RecordCounts {
    pub students: i64,
    pub grades: i64,
}

async fn record_counts(pool: &DbPool) -> Result<RecordCounts, sqlx::Error> {
    Ok(RecordCounts {
        students: StudentRepo::count(pool).await?,
        grades: GradeRepo::count(pool).await?,
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let records = match record_counts(&state.pool).await {
        Ok(counts) => Some(counts),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not query the store");
            None
        }
    };
    let db_healthy = records.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        records,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
