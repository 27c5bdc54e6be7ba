// Fetch controller: the one network exchange per analysis.
//
// The AnalysisBackend trait is the seam to the classification service.
// HttpAnalysisBackend talks to it over HTTP; tests substitute a fake.
// FetchController layers input validation, the busy/idle trigger state, and
// the store's generation guard on top of whichever backend it's given.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{AnalysisResponse, ErrorBody};
use crate::state::{AnalysisSnapshot, AppStore};

/// Fallback shown when the backend fails without an error message.
pub const GENERIC_SERVER_ERROR: &str = "Something went wrong. Please try again.";

/// Why an analysis attempt failed. Every variant is terminal for that
/// attempt; the operator has to trigger again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Please paste a YouTube video URL.")]
    Validation,

    #[error("Cannot connect to the server. Make sure the analysis backend is running at {base_url}.")]
    Connectivity { base_url: String },

    #[error("{0}")]
    ServerReported(String),

    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,

    #[error("A newer analysis request replaced this one.")]
    Superseded,

    #[error("An analysis is already running.")]
    Busy,
}

impl FetchError {
    /// Short machine-readable kind, used in logs and JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Validation => "validation",
            FetchError::Connectivity { .. } => "connectivity",
            FetchError::ServerReported(_) => "server",
            FetchError::Unexpected => "unexpected",
            FetchError::Superseded => "superseded",
            FetchError::Busy => "busy",
        }
    }
}

/// The analysis service: takes a video URL, returns the classified comments.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<AnalysisResponse, FetchError>;
}

/// Response from the backend's health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub api_key_configured: Option<bool>,
}

/// HTTP client for the analysis backend.
pub struct HttpAnalysisBackend {
    client: reqwest::Client,
    base_url: String,
    analyze_path: String,
}

impl HttpAnalysisBackend {
    /// Create a client for the backend at `base_url`. `timeout` of `None`
    /// means the request may wait indefinitely.
    pub fn new(base_url: &str, analyze_path: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("cinder/0.1 (comment-triage)");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            analyze_path: format!("/{}", analyze_path.trim_start_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check `GET {base}/api/health`.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Health check returned {}", response.status());
        }

        response
            .json::<HealthStatus>()
            .await
            .context("Failed to parse health response")
    }

    fn classify_transport_error(&self, err: &reqwest::Error) -> FetchError {
        if err.is_connect() || err.is_timeout() {
            FetchError::Connectivity {
                base_url: self.base_url.clone(),
            }
        } else {
            FetchError::Unexpected
        }
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn analyze(&self, url: &str) -> Result<AnalysisResponse, FetchError> {
        let endpoint = format!("{}{}", self.base_url, self.analyze_path);
        debug!(endpoint = %endpoint, "Analysis request");

        let response = self
            .client
            .post(&endpoint)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Analysis request failed");
                self.classify_transport_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
            warn!(status = %status, message = %message, "Backend reported an error");
            return Err(FetchError::ServerReported(message));
        }

        response.json::<AnalysisResponse>().await.map_err(|e| {
            warn!(error = %e, "Failed to decode analysis response");
            if e.is_timeout() {
                self.classify_transport_error(&e)
            } else {
                FetchError::Unexpected
            }
        })
    }
}

/// State of the analyze trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Busy,
}

impl TriggerState {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerState::Idle => "Analyze Comments",
            TriggerState::Busy => "Analyzing...",
        }
    }
}

/// Marks the trigger busy for as long as it lives.
struct BusyGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl<'a> BusyGuard<'a> {
    fn new(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self { in_flight }
    }

    /// Take the trigger only if nothing else holds it.
    fn exclusive(in_flight: &'a AtomicUsize) -> Option<Self> {
        in_flight
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { in_flight })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs submissions against a backend and commits results to the store.
pub struct FetchController {
    backend: Arc<dyn AnalysisBackend>,
    store: Arc<AppStore>,
    in_flight: AtomicUsize,
}

impl FetchController {
    pub fn new(backend: Arc<dyn AnalysisBackend>, store: Arc<AppStore>) -> Self {
        Self {
            backend,
            store,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    /// Busy while at least one submission is waiting on the backend.
    ///
    /// This is what the UI uses to disable the trigger. `try_submit` refuses
    /// to start while busy; `submit` does not check it.
    pub fn trigger_state(&self) -> TriggerState {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            TriggerState::Busy
        } else {
            TriggerState::Idle
        }
    }

    /// Validate `url_text`, run the analysis, and replace the state.
    ///
    /// On success the store holds the returned snapshot. The trigger is back
    /// to idle when this returns, whatever the outcome. Overlapping calls are
    /// allowed; the last one started wins and earlier ones end `Superseded`.
    pub async fn submit(&self, url_text: &str) -> Result<Arc<AnalysisSnapshot>, FetchError> {
        let url = validate(url_text)?;
        let _busy = BusyGuard::new(&self.in_flight);
        self.run(url).await
    }

    /// Like `submit`, but fails with `Busy` instead of starting a second
    /// request while one is in flight. Validation runs first, so blank input
    /// is reported as such even while busy.
    pub async fn try_submit(&self, url_text: &str) -> Result<Arc<AnalysisSnapshot>, FetchError> {
        let url = validate(url_text)?;
        let Some(_busy) = BusyGuard::exclusive(&self.in_flight) else {
            debug!("Rejecting submission while busy");
            return Err(FetchError::Busy);
        };
        self.run(url).await
    }

    async fn run(&self, url: &str) -> Result<Arc<AnalysisSnapshot>, FetchError> {
        let ticket = self.store.begin_request();
        info!(url = %url, generation = ticket.generation(), "Submitting analysis request");

        let response = self.backend.analyze(url).await.map_err(|e| {
            warn!(kind = e.kind(), error = %e, "Analysis failed");
            e
        })?;

        let snapshot = AnalysisSnapshot::from_response(url, response, Utc::now());
        let comment_count = snapshot.comments.len();
        match self.store.commit(ticket, snapshot).await {
            Some(committed) => {
                info!(comments = comment_count, "Analysis committed");
                Ok(committed)
            }
            None => Err(FetchError::Superseded),
        }
    }
}

/// Trim the operator's input; blank input never reaches the network.
fn validate(url_text: &str) -> Result<&str, FetchError> {
    let url = url_text.trim();
    if url.is_empty() {
        Err(FetchError::Validation)
    } else {
        Ok(url)
    }
}
