//! Route definitions for the `/grades` page.

use axum::routing::get;
use axum::Router;

use crate::handlers::grades;
use crate::state::AppState;

/// Routes mounted at `/grades`.
///
/// ```text
/// GET    /               -> page
/// POST   /               -> submit (create | delete)
/// GET    /export.csv     -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(grades::page).post(grades::submit))
        .route("/export.csv", get(grades::export_csv))
}
