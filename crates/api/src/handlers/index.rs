use axum::response::Html;

use crate::render;

/// GET /
pub async fn index() -> Html<String> {
    Html(render::index::render())
}
