// GET /: the dashboard page.

use axum::response::Html;

use crate::render::page::render_page;

pub async fn index() -> Html<String> {
    Html(render_page())
}
