// GET /api/report: the PDF evidence report for the current snapshot.
//
// Always built from the full snapshot, whatever the list is filtered to.
// Before any analysis the report still renders, with only its header.

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Local;
use tracing::info;

use crate::report::{build_report, ReportInput};
use crate::web::AppState;

pub async fn download_report(State(state): State<AppState>) -> Response {
    let snapshot = state.controller.store().snapshot().await;
    let input = ReportInput::from_snapshot(snapshot.as_deref());
    let report = build_report(&input, Local::now().date_naive());
    let bytes = report.to_pdf();

    info!(
        filename = %report.filename,
        pages = report.document.pages().len(),
        bytes = bytes.len(),
        "Serving report"
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        report.filename
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}
