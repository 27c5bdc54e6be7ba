// Report composer: the downloadable evidence document.
//
// Two passes over a DrawSurface:
//   1. compose: lay out every section top to bottom, adding pages as needed
//   2. finalize: once the page count is known, stamp each page's footer
//
// The composer reads the snapshot it is handed, never the on-screen filter,
// and skips any section whose data is missing.

pub mod document;
pub mod pdf;
pub mod surface;

use chrono::NaiveDate;
use tracing::debug;

use crate::format::{format_long_date, format_number, format_percent, title_case, truncate_chars};
use crate::models::{AnalysisSummary, Comment, Severity, VideoMetadata};
use crate::state::AnalysisSnapshot;

use document::PagedDocument;
use surface::{Align, Color, DrawSurface, Font};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 14.0;
pub const TILE_GAP: f32 = 4.0;
const TILE_HEIGHT: f32 = 24.0;
const HEADER_HEIGHT: f32 = 30.0;
/// Space reserved at the bottom of every page for the footer.
const FOOTER_ZONE: f32 = 22.0;
const LINE_HEIGHT: f32 = 5.0;
const ROW_LINE_HEIGHT: f32 = 4.0;
const CELL_PAD_X: f32 = 1.5;
const CELL_PAD_Y: f32 = 1.8;

pub const REPORT_TITLE: &str = "YouTube Comment Toxicity Report";
pub const ATTRIBUTION: &str =
    "Generated by Cinder - automated toxicity analysis of YouTube comments";
pub const NO_FLAGGED_MESSAGE: &str = "No offensive comments detected.";
pub const MAX_COMMENT_CHARS: usize = 120;
const MAX_AUTHOR_CHARS: usize = 24;

pub const DEFAULT_FILENAME: &str = "toxicity_report.pdf";
const FILENAME_PREFIX: &str = "toxicity_report_";
const FILENAME_SUFFIX: &str = ".pdf";
const FILENAME_TITLE_CHARS: usize = 30;

const BRAND: Color = Color::rgb(185, 28, 28);
const INK: Color = Color::rgb(31, 41, 55);
const MUTED: Color = Color::rgb(107, 114, 128);
const RULE: Color = Color::rgb(209, 213, 219);
const STRIPE: Color = Color::rgb(243, 244, 246);
const TILE_TOTAL: Color = Color::rgb(55, 65, 81);
const TILE_SAFE: Color = Color::rgb(22, 163, 74);
const TILE_FLAGGED: Color = Color::rgb(220, 38, 38);
const TILE_TOXICITY: Color = Color::rgb(234, 88, 12);
const OK_GREEN: Color = Color::rgb(21, 128, 61);

/// Table columns: heading and width in millimetres. Widths add up to the
/// content width (page width minus both margins).
const COLUMNS: [(&str, f32); 5] = [
    ("#", 10.0),
    ("Author", 34.0),
    ("Comment", 96.0),
    ("Severity", 22.0),
    ("Confidence", 20.0),
];

/// Text color of a table row for a given severity.
pub fn severity_color(severity: Option<Severity>) -> Color {
    match severity {
        Some(Severity::High) => Color::rgb(220, 38, 38),
        Some(Severity::Medium) => Color::rgb(234, 88, 12),
        Some(Severity::Low) => Color::rgb(161, 98, 7),
        None => INK,
    }
}

/// Width of one summary tile on a page `page_width` wide.
pub fn tile_width(page_width: f32) -> f32 {
    (page_width - 2.0 * MARGIN - 3.0 * TILE_GAP) / 4.0
}

/// Everything the composer reads. Absent parts skip their sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportInput<'a> {
    pub video: Option<&'a VideoMetadata>,
    pub analysis: Option<&'a AnalysisSummary>,
    pub comments: Option<&'a [Comment]>,
    pub source_url: Option<&'a str>,
}

impl<'a> ReportInput<'a> {
    pub fn from_snapshot(snapshot: Option<&'a AnalysisSnapshot>) -> Self {
        match snapshot {
            Some(s) => Self {
                video: s.video.as_ref(),
                analysis: s.analysis.as_ref(),
                comments: Some(&s.comments),
                source_url: Some(&s.source_url),
            },
            None => Self::default(),
        }
    }
}

/// A finished report: the paginated document and its download filename.
#[derive(Debug, Clone)]
pub struct Report {
    pub filename: String,
    pub document: PagedDocument,
}

impl Report {
    pub fn to_pdf(&self) -> Vec<u8> {
        pdf::render_pdf(&self.document)
    }
}

/// Compose and finalize a report dated `today`.
pub fn build_report(input: &ReportInput<'_>, today: NaiveDate) -> Report {
    let mut document = PagedDocument::new(PAGE_WIDTH, PAGE_HEIGHT);
    compose(&mut document, input, today);
    finalize(&mut document);
    debug!(pages = document.page_count(), "Report composed");

    Report {
        filename: report_filename(input.video.map(|v| v.title.as_str())),
        document,
    }
}

/// Download filename derived from the video title.
///
/// The first 30 characters of the title with everything outside
/// `[A-Za-z0-9]` replaced by `_`; `toxicity_report.pdf` without a title.
pub fn report_filename(title: Option<&str>) -> String {
    match title.filter(|t| !t.is_empty()) {
        Some(title) => {
            let slug: String = title
                .chars()
                .take(FILENAME_TITLE_CHARS)
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            format!("{FILENAME_PREFIX}{slug}{FILENAME_SUFFIX}")
        }
        None => DEFAULT_FILENAME.to_string(),
    }
}

/// Vertical cursor over a surface, breaking to a new page when a block
/// would run into the footer zone.
struct Cursor<'s, S: DrawSurface> {
    surface: &'s mut S,
    y: f32,
}

impl<S: DrawSurface> Cursor<'_, S> {
    fn bottom(&self) -> f32 {
        self.surface.page_size().1 - FOOTER_ZONE
    }

    fn width(&self) -> f32 {
        self.surface.page_size().0
    }

    fn content_width(&self) -> f32 {
        self.width() - 2.0 * MARGIN
    }

    /// Start a new page unless `height` more millimetres fit. Returns true
    /// if a page was added.
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.y + height > self.bottom() {
            self.surface.add_page();
            self.y = MARGIN;
            true
        } else {
            false
        }
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(12.0);
        self.y += 6.0;
        self.surface
            .text(MARGIN, self.y, text, Font::bold(13.0, INK), Align::Left);
        self.y += 3.0;
        let right = self.width() - MARGIN;
        self.surface.line(MARGIN, self.y, right, self.y, 0.3, RULE);
        self.y += 4.0;
    }

    /// A bold label followed by a value wrapped to the remaining width.
    fn labeled(&mut self, label: &str, value: &str) {
        const LABEL_WIDTH: f32 = 20.0;
        let font = Font::regular(10.0, INK);
        let lines = self
            .surface
            .wrap_text(value, self.content_width() - LABEL_WIDTH, font);
        for (i, line) in lines.iter().enumerate() {
            self.ensure_space(LINE_HEIGHT);
            self.y += LINE_HEIGHT;
            if i == 0 {
                self.surface
                    .text(MARGIN, self.y, label, Font::bold(10.0, INK), Align::Left);
            }
            self.surface
                .text(MARGIN + LABEL_WIDTH, self.y, line, font, Align::Left);
        }
    }
}

/// Lay out all content. Footers are left to `finalize`.
pub fn compose<S: DrawSurface>(surface: &mut S, input: &ReportInput<'_>, today: NaiveDate) {
    let mut cursor = Cursor { surface, y: 0.0 };

    draw_header(&mut cursor, today);

    if input.video.is_some() || input.source_url.is_some() {
        draw_video_details(&mut cursor, input.video, input.source_url);
    }

    if let Some(analysis) = input.analysis {
        draw_summary_tiles(&mut cursor, analysis);
        draw_severity_breakdown(&mut cursor, analysis);
    }

    if let Some(comments) = input.comments {
        draw_flagged_table(&mut cursor, comments);
    }
}

/// Stamp every page with a rule, the attribution line, and "Page X of N".
pub fn finalize<S: DrawSurface>(surface: &mut S) {
    let (width, height) = surface.page_size();
    let total = surface.page_count();
    let font = Font::regular(8.0, MUTED);

    for index in 0..total {
        surface.set_page(index);
        let rule_y = height - 16.0;
        surface.line(MARGIN, rule_y, width - MARGIN, rule_y, 0.3, RULE);
        surface.text(MARGIN, rule_y + 6.0, ATTRIBUTION, font, Align::Left);
        surface.text(
            width - MARGIN,
            rule_y + 6.0,
            &format!("Page {} of {}", index + 1, total),
            font,
            Align::Right,
        );
    }
}

fn draw_header<S: DrawSurface>(cursor: &mut Cursor<'_, S>, today: NaiveDate) {
    let width = cursor.width();
    cursor.surface.fill_rect(0.0, 0.0, width, HEADER_HEIGHT, BRAND);
    cursor.surface.text(
        MARGIN,
        14.0,
        REPORT_TITLE,
        Font::bold(18.0, Color::WHITE),
        Align::Left,
    );
    cursor.surface.text(
        MARGIN,
        22.0,
        &format!("Generated on {}", format_long_date(today)),
        Font::regular(10.0, Color::WHITE),
        Align::Left,
    );
    cursor.y = HEADER_HEIGHT + 4.0;
}

fn draw_video_details<S: DrawSurface>(
    cursor: &mut Cursor<'_, S>,
    video: Option<&VideoMetadata>,
    source_url: Option<&str>,
) {
    cursor.heading("Video Details");
    if let Some(video) = video {
        cursor.labeled("Title:", &video.title);
        cursor.labeled("Channel:", &video.channel_title);
    }
    if let Some(url) = source_url {
        cursor.labeled("URL:", url);
    }
    cursor.y += 4.0;
}

fn draw_summary_tiles<S: DrawSurface>(cursor: &mut Cursor<'_, S>, analysis: &AnalysisSummary) {
    cursor.heading("Summary");
    cursor.ensure_space(TILE_HEIGHT);

    let tile_w = tile_width(cursor.width());
    let tiles = [
        ("Total", format_number(analysis.total_comments), TILE_TOTAL),
        ("Safe", format_number(analysis.safe_count), TILE_SAFE),
        ("Flagged", format_number(analysis.flagged_count), TILE_FLAGGED),
        (
            "Toxicity",
            format_percent(analysis.toxicity_percentage),
            TILE_TOXICITY,
        ),
    ];

    let top = cursor.y;
    for (i, (caption, value, color)) in tiles.iter().enumerate() {
        let x = MARGIN + i as f32 * (tile_w + TILE_GAP);
        let center = x + tile_w / 2.0;
        cursor.surface.fill_rect(x, top, tile_w, TILE_HEIGHT, *color);
        cursor.surface.text(
            center,
            top + 11.0,
            value,
            Font::bold(16.0, Color::WHITE),
            Align::Center,
        );
        cursor.surface.text(
            center,
            top + 19.0,
            caption,
            Font::regular(8.0, Color::WHITE),
            Align::Center,
        );
    }
    cursor.y = top + TILE_HEIGHT + 4.0;
}

fn draw_severity_breakdown<S: DrawSurface>(
    cursor: &mut Cursor<'_, S>,
    analysis: &AnalysisSummary,
) {
    cursor.ensure_space(LINE_HEIGHT + 4.0);
    cursor.y += LINE_HEIGHT;
    let line = format!(
        "Severity breakdown: High {} | Medium {} | Low {}",
        format_number(analysis.high_severity),
        format_number(analysis.medium_severity),
        format_number(analysis.low_severity),
    );
    cursor
        .surface
        .text(MARGIN, cursor.y, &line, Font::regular(10.0, INK), Align::Left);
    cursor.y += 4.0;
}

fn draw_flagged_table<S: DrawSurface>(cursor: &mut Cursor<'_, S>, comments: &[Comment]) {
    let flagged: Vec<&Comment> = comments.iter().filter(|c| c.is_flagged).collect();
    cursor.heading(&format!("Flagged Comments ({})", flagged.len()));

    if flagged.is_empty() {
        cursor.ensure_space(LINE_HEIGHT + 2.0);
        cursor.y += LINE_HEIGHT + 1.0;
        cursor.surface.text(
            MARGIN,
            cursor.y,
            NO_FLAGGED_MESSAGE,
            Font::regular(11.0, OK_GREEN),
            Align::Left,
        );
        cursor.y += 2.0;
        return;
    }

    draw_table_header(cursor);

    for (i, comment) in flagged.iter().enumerate() {
        let severity = comment.flagged_severity();
        let font = Font::regular(8.5, severity_color(severity));
        let body = comment.text.split_whitespace().collect::<Vec<_>>().join(" ");
        let cells = [
            (i + 1).to_string(),
            truncate_chars(&comment.author, MAX_AUTHOR_CHARS),
            truncate_chars(&body, MAX_COMMENT_CHARS),
            severity
                .map(|s| title_case(s.as_str()))
                .unwrap_or_else(|| "Flagged".to_string()),
            format!("{}%", comment.confidence.unwrap_or(0).min(100)),
        ];

        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(COLUMNS.iter())
            .map(|(cell, (_, w))| cursor.surface.wrap_text(cell, w - 2.0 * CELL_PAD_X, font))
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let row_height = line_count as f32 * ROW_LINE_HEIGHT + 2.0 * CELL_PAD_Y;

        if cursor.ensure_space(row_height) {
            draw_table_header(cursor);
        }

        let top = cursor.y;
        if i % 2 == 1 {
            let width = cursor.content_width();
            cursor.surface.fill_rect(MARGIN, top, width, row_height, STRIPE);
        }

        let mut x = MARGIN;
        for (lines, (_, col_width)) in wrapped.iter().zip(COLUMNS.iter()) {
            for (n, line) in lines.iter().enumerate() {
                let baseline = top + CELL_PAD_Y + (n as f32 + 1.0) * ROW_LINE_HEIGHT - 1.0;
                cursor
                    .surface
                    .text(x + CELL_PAD_X, baseline, line, font, Align::Left);
            }
            x += col_width;
        }
        cursor.y = top + row_height;
    }
}

fn draw_table_header<S: DrawSurface>(cursor: &mut Cursor<'_, S>) {
    const HEIGHT: f32 = 8.0;
    cursor.ensure_space(HEIGHT + ROW_LINE_HEIGHT + 2.0 * CELL_PAD_Y);

    let top = cursor.y;
    let width = cursor.content_width();
    cursor.surface.fill_rect(MARGIN, top, width, HEIGHT, TILE_TOTAL);

    let mut x = MARGIN;
    for (title, col_width) in COLUMNS {
        cursor.surface.text(
            x + CELL_PAD_X,
            top + 5.5,
            title,
            Font::bold(9.0, Color::WHITE),
            Align::Left,
        );
        x += col_width;
    }
    cursor.y = top + HEIGHT;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fill_content_width() {
        let total: f32 = COLUMNS.iter().map(|(_, w)| w).sum();
        assert!((total - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 1e-3);
    }

    #[test]
    fn tile_width_accounts_for_gaps() {
        assert!((tile_width(PAGE_WIDTH) - 42.5).abs() < 1e-3);
    }

    #[test]
    fn filename_without_title_uses_default() {
        assert_eq!(report_filename(None), DEFAULT_FILENAME);
        assert_eq!(report_filename(Some("")), DEFAULT_FILENAME);
    }

    #[test]
    fn filename_keeps_only_first_thirty_chars() {
        let name = report_filename(Some(&"a".repeat(50)));
        assert_eq!(name, format!("toxicity_report_{}.pdf", "a".repeat(30)));
    }

    #[test]
    fn empty_input_still_gets_header_and_footer() {
        let report = build_report(
            &ReportInput::default(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        let pages = report.document.pages();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains_text(REPORT_TITLE));
        assert!(pages[0].contains_text("Generated on October 19, 2026"));
        assert!(pages[0].contains_text("Page 1 of 1"));
        assert!(!pages[0].contains_text("Summary"));
    }
}
