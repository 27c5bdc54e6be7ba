// Route tests for the dashboard server, driven through tower's oneshot
// against an in-process router. The analysis backend is a canned fake.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use cinder::config::Config;
use cinder::fetch::{AnalysisBackend, FetchController, FetchError};
use cinder::models::{AnalysisResponse, AnalysisSummary, Comment, Count, Severity, VideoMetadata};
use cinder::state::AppStore;
use cinder::web::{build_router, AppState};

struct CannedBackend;

#[async_trait]
impl AnalysisBackend for CannedBackend {
    async fn analyze(&self, url: &str) -> Result<AnalysisResponse, FetchError> {
        if url.contains("broken") {
            return Err(FetchError::ServerReported("Video not found".to_string()));
        }
        Ok(AnalysisResponse {
            video: Some(VideoMetadata {
                title: "Route Test: Video!".to_string(),
                channel_title: "Channel".to_string(),
                thumbnail: String::new(),
                published_at: None,
                view_count: Count::Known(10),
                like_count: Count::Unavailable,
                comment_count: Count::Known(2),
            }),
            comments: vec![
                Comment {
                    author: "safe_sam".to_string(),
                    author_profile_image: None,
                    text: "great".to_string(),
                    published_at: None,
                    updated_at: None,
                    like_count: 0,
                    is_flagged: false,
                    severity: None,
                    confidence: None,
                },
                Comment {
                    author: "mean_max".to_string(),
                    author_profile_image: None,
                    text: "terrible person".to_string(),
                    published_at: None,
                    updated_at: None,
                    like_count: 1,
                    is_flagged: true,
                    severity: Some(Severity::Medium),
                    confidence: Some(72),
                },
            ],
            analysis: Some(AnalysisSummary {
                total_comments: 2,
                safe_count: 1,
                flagged_count: 1,
                high_severity: 0,
                medium_severity: 1,
                low_severity: 0,
                toxicity_percentage: 50.0,
            }),
            total_fetched: Some(2),
        })
    }
}

fn test_config() -> Config {
    Config {
        api_base: "http://127.0.0.1:5000".to_string(),
        analyze_path: "/api/comments".to_string(),
        request_timeout: None,
        bind: "127.0.0.1".to_string(),
        port: 0,
        report_dir: PathBuf::from("/tmp"),
    }
}

fn app() -> Router {
    let controller = FetchController::new(Arc::new(CannedBackend), Arc::new(AppStore::new()));
    build_router(AppState {
        config: Arc::new(test_config()),
        controller: Arc::new(controller),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, header::HeaderMap) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec(), headers)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>, header::HeaderMap) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_analyze(app: &Router, url: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::post("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "url": url }).to_string()))
        .unwrap();
    let (status, body, _) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn index_serves_dashboard_page() {
    let app = app();
    let (status, body, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("youtubeUrl"));
    assert!(html.contains("Analyze Comments"));
}

#[tokio::test]
async fn health_is_ok() {
    let app = app();
    let (status, body, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "http://127.0.0.1:5000");
}

#[tokio::test]
async fn comments_before_analysis_is_not_found() {
    let app = app();
    let (status, _, _) = get(&app, "/api/comments?filter=all").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_url_is_a_validation_error() {
    let app = app();
    let (status, body) = post_analyze(&app, "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
    assert_eq!(body["error"], "Please paste a YouTube video URL.");
}

#[tokio::test]
async fn backend_message_is_passed_through() {
    let app = app();
    let (status, body) = post_analyze(&app, "https://youtu.be/broken").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "server");
    assert_eq!(body["error"], "Video not found");
}

#[tokio::test]
async fn analyze_then_filter_then_report() {
    let app = app();

    let (status, body) = post_analyze(&app, "https://youtu.be/ok").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scrollAfterMs"], 200);
    assert_eq!(body["totalFetched"], 2);
    assert_eq!(body["counts"]["all"], 2);
    assert_eq!(body["counts"]["safe"], 1);
    assert_eq!(body["counts"]["flagged"], 1);
    assert_eq!(body["counts"]["high"], 0);
    let html = body["html"].as_str().unwrap();
    assert!(html.contains("safe_sam"));
    assert!(html.contains("mean_max"));
    assert!(html.contains("Medium · 72%"));

    let (status, body, _) = get(&app, "/api/comments?filter=flagged").await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["filter"], "flagged");
    assert_eq!(body["count"], 1);
    assert!(!body["html"].as_str().unwrap().contains("safe_sam"));

    let (_, body, _) = get(&app, "/api/comments?filter=bogus").await;
    let body = json(&body);
    assert_eq!(body["filter"], "all");
    assert_eq!(body["count"], 2);

    let (status, body, headers) = get(&app, "/api/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("toxicity_report_Route_Test__Video_.pdf"));
    assert!(body.starts_with(b"%PDF-1.4"));
}

#[tokio::test]
async fn report_before_analysis_uses_default_filename() {
    let app = app();
    let (status, body, headers) = get(&app, "/api/report").await;
    assert_eq!(status, StatusCode::OK);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("toxicity_report.pdf"));
    assert!(body.starts_with(b"%PDF-1.4"));
}
