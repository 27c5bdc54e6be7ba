// GET /api/comments?filter=: re-render the comment list for a filter.
//
// Unknown filter values show everything. Reads the current snapshot only;
// nothing about the filter is stored server-side.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::filter::{derive, FilterSelector};
use crate::render::render_list;
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct CommentsQuery {
    /// all | safe | flagged | high
    pub filter: Option<String>,
}

pub async fn list_comments(
    State(state): State<AppState>,
    Query(params): Query<CommentsQuery>,
) -> Response {
    let Some(snapshot) = state.controller.store().snapshot().await else {
        return api_error(StatusCode::NOT_FOUND, "No analysis yet. Analyze a video first.");
    };

    let selector = params
        .filter
        .as_deref()
        .map(FilterSelector::parse)
        .unwrap_or_default();
    let comments = derive(&snapshot, selector);
    let view = render_list(&comments, Utc::now());

    Json(serde_json::json!({
        "html": view.html,
        "filter": selector.as_str(),
        "count": comments.len(),
    }))
    .into_response()
}
