// Web server: Axum-based single-user dashboard.
//
// `/` serves the dashboard page; the page script drives the JSON endpoints
// under /api/*. All HTML fragments are rendered server-side from the
// current snapshot, so untrusted text is escaped in exactly one place.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::fetch::FetchController;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: Arc<FetchController>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, controller: Arc<FetchController>) -> Result<()> {
    let addr = format!("{}:{}", config.bind, config.port);
    let state = AppState {
        config: Arc::new(config),
        controller,
    };

    let app = build_router(state);

    info!("Cinder dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(health))
        .route("/api/analyze", post(handlers::analyze::analyze))
        .route("/api/comments", get(handlers::comments::list_comments))
        .route("/api/report", get(handlers::report::download_report))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check. Always 200 OK; also names the backend this server uses.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "ok",
            "backend": state.config.api_base,
        })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
