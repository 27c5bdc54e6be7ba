// Render pipeline: turns a snapshot into the dashboard's HTML.
//
// A full render (after a successful fetch) draws the video card, the
// aggregate dashboard, and the complete comment list, and asks the page to
// scroll the results into view. A filter change re-renders the list only.
//
// Every piece of backend text goes through sanitize::escape_html on its way
// into the markup.

pub mod comments;
pub mod dashboard;
pub mod page;
pub mod video;

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::Comment;
use crate::state::AnalysisSnapshot;

/// Delay before a full render scrolls the results region into view.
pub const SCROLL_DELAY: Duration = Duration::from_millis(200);

/// Markup plus the client-side effects that should follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub html: String,
    /// When set, the page scrolls the results into view after this delay.
    pub scroll_after: Option<Duration>,
}

/// Render the whole results region for a freshly fetched snapshot.
///
/// The list always shows every comment: a new fetch resets the filter.
pub fn render_full(snapshot: &AnalysisSnapshot, now: DateTime<Utc>) -> RenderedView {
    let mut html = String::new();

    if let Some(video) = &snapshot.video {
        html.push_str(&video::render_video_card(video));
    }
    if let Some(analysis) = &snapshot.analysis {
        html.push_str(&dashboard::render_dashboard(analysis));
    }

    let all: Vec<&Comment> = snapshot.comments.iter().collect();
    let _ = write!(
        html,
        r#"<section class="comments-section" id="commentsSection">
<div class="comments-header"><h2>Comments</h2><span class="count-badge">{} fetched</span></div>
<div class="comments-list" id="commentsList">{}</div>
</section>"#,
        snapshot.total_fetched,
        comments::render_comment_list(&all, now, comments::NO_COMMENTS_MESSAGE),
    );

    RenderedView {
        html,
        scroll_after: Some(SCROLL_DELAY),
    }
}

/// Re-render just the comment list for a filtered subset.
pub fn render_list(comments: &[&Comment], now: DateTime<Utc>) -> RenderedView {
    RenderedView {
        html: comments::render_comment_list(comments, now, comments::EMPTY_LIST_MESSAGE),
        scroll_after: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> AnalysisSnapshot {
        AnalysisSnapshot {
            source_url: "https://youtu.be/quiet".to_string(),
            video: None,
            comments: Vec::new(),
            analysis: None,
            total_fetched: 0,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn video_without_comments_says_so() {
        let view = render_full(&empty_snapshot(), Utc::now());
        assert!(view.html.contains(comments::NO_COMMENTS_MESSAGE));
        assert!(!view.html.contains(comments::EMPTY_LIST_MESSAGE));
        assert!(view.html.contains("0 fetched"));
    }

    #[test]
    fn empty_filter_result_uses_filter_message() {
        let view = render_list(&[], Utc::now());
        assert!(view.html.contains(comments::EMPTY_LIST_MESSAGE));
        assert!(view.scroll_after.is_none());
    }
}
