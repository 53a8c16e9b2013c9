//! Route definitions for the `/students` page.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /               -> page
/// POST   /               -> submit (create | delete)
/// GET    /export.csv     -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::page).post(students::submit))
        .route("/export.csv", get(students::export_csv))
}
