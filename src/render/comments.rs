// Comment list and comment cards.
//
// The list is rebuilt from scratch on every call; nothing from a previous
// render survives. Card reveal delays are cosmetic only.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::format::{format_number, format_relative_date};
use crate::models::Comment;
use crate::sanitize::escape_html;

/// Per-card step of the staggered reveal animation, in seconds.
pub const STAGGER_STEP_SECS: f64 = 0.03;

/// Text of the placeholder shown when the list is empty.
pub const EMPTY_LIST_MESSAGE: &str = "No comments match this filter.";

/// Placeholder for a freshly fetched video that has no comments at all.
pub const NO_COMMENTS_MESSAGE: &str = "No comments found for this video.";

const LIKE_ICON: &str = r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="currentColor"><path d="M14 9V5a3 3 0 0 0-3-3l-4 9v11h11.28a2 2 0 0 0 2-1.7l1.38-9a2 2 0 0 0-2-2.3H14z"/><path d="M7 22H4a2 2 0 0 1-2-2v-7a2 2 0 0 1 2-2h3"/></svg>"#;

/// Render the cards for `comments` in the given order, or a single
/// placeholder card reading `empty_message` when there are none.
pub fn render_comment_list(
    comments: &[&Comment],
    now: DateTime<Utc>,
    empty_message: &str,
) -> String {
    if comments.is_empty() {
        return format!(
            r#"<div class="comment-card comment-empty"><p>{empty_message}</p></div>"#
        );
    }

    let mut html = String::new();
    for (index, comment) in comments.iter().enumerate() {
        html.push_str(&render_comment_card(comment, index, now));
    }
    html
}

/// Render one card. `index` is the zero-based position in the rendered list.
pub fn render_comment_card(comment: &Comment, index: usize, now: DateTime<Utc>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="comment-card{flagged}" style="animation-delay: {delay:.2}s">
<div class="comment-header">
{avatar}
<div class="comment-meta">
<span class="comment-author">{author}</span>
<span class="comment-date">{date}</span>
</div>
{badge}
<span class="comment-number">#{number}</span>
</div>
<div class="comment-text">{text}</div>"#,
        flagged = if comment.is_flagged { " is-flagged" } else { "" },
        delay = index as f64 * STAGGER_STEP_SECS,
        avatar = render_avatar(comment),
        author = escape_html(&comment.author),
        date = format_relative_date(comment.published_at, now),
        badge = render_badge(comment),
        number = index + 1,
        text = escape_html(&comment.text),
    );

    if comment.like_count > 0 {
        let _ = write!(
            html,
            r#"
<div class="comment-footer"><div class="comment-likes">{LIKE_ICON} {}</div></div>"#,
            format_number(comment.like_count)
        );
    }

    html.push_str("\n</div>");
    html
}

fn render_avatar(comment: &Comment) -> String {
    match comment.avatar_url() {
        Some(url) => format!(
            r#"<img class="comment-avatar" src="{}" alt="{}" data-initial="{}" loading="lazy">"#,
            escape_html(url),
            escape_html(&comment.author),
            escape_html(&comment.initial()),
        ),
        None => format!(
            r#"<div class="comment-avatar-placeholder">{}</div>"#,
            escape_html(&comment.initial())
        ),
    }
}

/// Badge text for a comment: "High · 90%" when flagged, "Safe" otherwise.
pub fn badge_text(comment: &Comment) -> String {
    if !comment.is_flagged {
        return "Safe".to_string();
    }
    let confidence = comment.confidence.unwrap_or(0).min(100);
    match comment.severity {
        Some(severity) => format!("{} · {}%", severity.label(), confidence),
        None => format!("Flagged · {confidence}%"),
    }
}

fn render_badge(comment: &Comment) -> String {
    let class = if comment.is_flagged {
        match comment.severity {
            Some(severity) => format!("badge badge-{}", severity.as_str()),
            None => "badge badge-flagged".to_string(),
        }
    } else {
        "badge badge-safe".to_string()
    };
    format!(r#"<span class="{class}">{}</span>"#, badge_text(comment))
}
