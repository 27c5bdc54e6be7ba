// POST /api/analyze: run one analysis and return the full results render.
//
// Returns 409 Conflict while another analysis is in flight, mirroring the
// disabled trigger button. Input is validated before the busy check, so a
// blank URL is always a 400. Each FetchError kind maps to one status code;
// the body carries the user-facing message for the error banner.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::fetch::FetchError;
use crate::filter::{count, FilterSelector};
use crate::render::render_full;
use crate::web::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

pub async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeRequest>) -> Response {
    match state.controller.try_submit(&body.url).await {
        Ok(snapshot) => {
            let view = render_full(&snapshot, Utc::now());
            let counts: serde_json::Map<String, serde_json::Value> = FilterSelector::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), count(&snapshot.comments, *s).into()))
                .collect();
            Json(serde_json::json!({
                "html": view.html,
                "scrollAfterMs": view.scroll_after.map(|d| d.as_millis() as u64),
                "totalFetched": snapshot.total_fetched,
                "counts": counts,
            }))
            .into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            (
                status,
                Json(serde_json::json!({ "error": e.to_string(), "kind": e.kind() })),
            )
                .into_response()
        }
    }
}

fn status_for(error: &FetchError) -> StatusCode {
    match error {
        FetchError::Validation => StatusCode::BAD_REQUEST,
        FetchError::Connectivity { .. } | FetchError::ServerReported(_) => StatusCode::BAD_GATEWAY,
        FetchError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        FetchError::Superseded | FetchError::Busy => StatusCode::CONFLICT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_and_superseded_are_conflicts() {
        assert_eq!(status_for(&FetchError::Busy), StatusCode::CONFLICT);
        assert_eq!(status_for(&FetchError::Superseded), StatusCode::CONFLICT);
        assert_eq!(status_for(&FetchError::Validation), StatusCode::BAD_REQUEST);
    }
}
