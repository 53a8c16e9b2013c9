pub mod grades;
pub mod health;
pub mod students;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the page route tree.
///
/// ```text
/// GET  /                       landing page
/// /students                    list (GET), create or delete (POST)
/// /students/export.csv         filtered CSV export
/// /grades                      list (GET), create or delete (POST)
/// /grades/export.csv           filtered CSV export
/// ```
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index::index))
        .nest("/students", students::router())
        .nest("/grades", grades::router())
}
