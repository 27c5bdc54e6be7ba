// Application state: the single slot holding the last successful analysis.
//
// The slot is only ever replaced wholesale. Readers (render pipeline, filter
// engine, report composer) clone the `Arc` and work on an immutable snapshot,
// so they never observe a partially written state.
//
// Each submission takes a ticket from a generation counter. A completion only
// commits if its ticket is still the newest one issued, so a slow response
// from a superseded request can't overwrite a newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::models::{AnalysisResponse, AnalysisSummary, Comment, VideoMetadata};

/// One fully consistent analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    /// The URL exactly as the operator submitted it (trimmed).
    pub source_url: String,
    pub video: Option<VideoMetadata>,
    /// Comments in fetched order.
    pub comments: Vec<Comment>,
    pub analysis: Option<AnalysisSummary>,
    pub total_fetched: u64,
    pub fetched_at: DateTime<Utc>,
}

impl AnalysisSnapshot {
    pub fn from_response(
        source_url: &str,
        response: AnalysisResponse,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let total_fetched = response
            .total_fetched
            .unwrap_or(response.comments.len() as u64);
        Self {
            source_url: source_url.to_string(),
            video: response.video,
            comments: response.comments,
            analysis: response.analysis,
            total_fetched,
            fetched_at,
        }
    }
}

/// Generation number taken by a submission before it goes to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Holder of the current snapshot.
#[derive(Default)]
pub struct AppStore {
    slot: RwLock<Option<Arc<AnalysisSnapshot>>>,
    generation: AtomicU64,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request. Any older outstanding ticket is
    /// superseded from this point on.
    pub fn begin_request(&self) -> RequestTicket {
        let ticket = RequestTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        debug!(generation = ticket.0, "Issued request ticket");
        ticket
    }

    /// True if no newer ticket has been issued since `ticket`.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Replace the state with `snapshot` if `ticket` is still the newest.
    ///
    /// Returns the committed snapshot, or `None` when the ticket was
    /// superseded (the existing state is left untouched).
    pub async fn commit(
        &self,
        ticket: RequestTicket,
        snapshot: AnalysisSnapshot,
    ) -> Option<Arc<AnalysisSnapshot>> {
        let mut slot = self.slot.write().await;
        if !self.is_current(ticket) {
            warn!(
                generation = ticket.0,
                latest = self.generation.load(Ordering::SeqCst),
                "Discarding response from superseded request"
            );
            return None;
        }
        let snapshot = Arc::new(snapshot);
        *slot = Some(snapshot.clone());
        Some(snapshot)
    }

    /// The current snapshot, or `None` before the first successful fetch.
    pub async fn snapshot(&self) -> Option<Arc<AnalysisSnapshot>> {
        self.slot.read().await.clone()
    }
}
