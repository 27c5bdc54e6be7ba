// Colored terminal output for `cinder analyze`.
//
// Mirrors the web dashboard: video card, summary counts, then the
// (optionally filtered) comment list. Comment text is shown raw here, since
// a terminal has no markup to inject into, but is truncated to keep lines sane.

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::filter::FilterSelector;
use crate::format::{format_count, format_number, format_percent, format_relative_date, truncate_chars};
use crate::models::{AnalysisSummary, Comment, Severity, VideoMetadata};
use crate::render::comments::{badge_text, EMPTY_LIST_MESSAGE};
use crate::render::dashboard::IndicatorLevel;

/// Display the video header block.
pub fn display_video(video: &VideoMetadata) {
    println!("\n{}", format!("=== {} ===", video.title).bold());
    println!("  {}", video.channel_title.dimmed());
    println!(
        "  {} views  ·  {} likes  ·  {} comments",
        format_count(video.view_count),
        format_count(video.like_count),
        format_count(video.comment_count),
    );
}

/// Display the aggregate counts and a text severity bar.
pub fn display_dashboard(analysis: &AnalysisSummary) {
    println!();
    println!(
        "  Total: {}   Safe: {}   Flagged: {}",
        format_number(analysis.total_comments).bold(),
        format_number(analysis.safe_count).green(),
        format_number(analysis.flagged_count).red(),
    );

    let pct = analysis.toxicity_percentage.clamp(0.0, 100.0);
    let filled = (pct / 5.0).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled.min(20)));
    let bar = match IndicatorLevel::from_percentage(pct) {
        IndicatorLevel::High => bar.red(),
        IndicatorLevel::Medium => bar.yellow(),
        IndicatorLevel::Low => bar.green(),
    };
    println!("  Toxicity: [{}] {}", bar, format_percent(pct));
    println!(
        "  Severity: {} high, {} medium, {} low",
        analysis.high_severity.to_string().red().bold(),
        analysis.medium_severity.to_string().yellow(),
        analysis.low_severity.to_string().bright_yellow(),
    );
}

/// Display a comment list under a filter heading.
pub fn display_comments(comments: &[&Comment], selector: FilterSelector, now: DateTime<Utc>) {
    println!(
        "\n{}",
        format!("=== {} ({}) ===", selector.label(), comments.len()).bold()
    );

    if comments.is_empty() {
        println!("  {EMPTY_LIST_MESSAGE}");
        return;
    }

    for (i, comment) in comments.iter().enumerate() {
        let author = if comment.author.is_empty() {
            "?"
        } else {
            comment.author.as_str()
        };
        println!(
            "  {:>3}. {} {}  {}",
            i + 1,
            author.bold(),
            format_relative_date(comment.published_at, now).dimmed(),
            colorize_badge(comment),
        );
        let preview = truncate_chars(&comment.text.replace('\n', " "), 160);
        println!("       {}", preview);
        if comment.like_count > 0 {
            println!("       {}", format!("{} likes", format_number(comment.like_count)).dimmed());
        }
    }
}

/// Colorize a comment's badge by severity.
fn colorize_badge(comment: &Comment) -> colored::ColoredString {
    let text = badge_text(comment);
    if !comment.is_flagged {
        return text.green();
    }
    match comment.severity {
        Some(Severity::High) => text.red().bold(),
        Some(Severity::Medium) => text.yellow(),
        Some(Severity::Low) => text.bright_yellow(),
        None => text.red(),
    }
}
