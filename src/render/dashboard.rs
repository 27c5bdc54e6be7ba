// Aggregate dashboard: summary counts and the severity indicator.
//
// The indicator bar is emitted at 0% width with the real percentage in
// `data-target`; the page script grows it after INDICATOR_DELAY.

use std::time::Duration;

use crate::format::{format_number, format_percent};
use crate::models::AnalysisSummary;

/// Delay before the indicator animates toward its target width.
pub const INDICATOR_DELAY: Duration = Duration::from_millis(300);

/// Color band of the toxicity indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorLevel {
    Low,
    Medium,
    High,
}

impl IndicatorLevel {
    /// `> 50` is high, `> 25` is medium, anything else low. Exact boundary
    /// values belong to the lower band.
    pub fn from_percentage(pct: f64) -> Self {
        if pct > 50.0 {
            IndicatorLevel::High
        } else if pct > 25.0 {
            IndicatorLevel::Medium
        } else {
            IndicatorLevel::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            IndicatorLevel::Low => "level-low",
            IndicatorLevel::Medium => "level-medium",
            IndicatorLevel::High => "level-high",
        }
    }
}

pub fn render_dashboard(analysis: &AnalysisSummary) -> String {
    let pct = analysis.toxicity_percentage.clamp(0.0, 100.0);
    let level = IndicatorLevel::from_percentage(pct);

    format!(
        r#"<section class="dashboard" id="analysisDashboard">
<div class="stat-grid">
<div class="stat-tile tile-total"><span class="stat-value">{total}</span><span class="stat-label">Total</span></div>
<div class="stat-tile tile-safe"><span class="stat-value">{safe}</span><span class="stat-label">Safe</span></div>
<div class="stat-tile tile-flagged"><span class="stat-value">{flagged}</span><span class="stat-label">Flagged</span></div>
<div class="stat-tile tile-toxicity"><span class="stat-value">{pct_text}</span><span class="stat-label">Toxicity</span></div>
</div>
<div class="severity-indicator">
<div class="severity-track"><div class="severity-fill {class}" style="width: 0%" data-target="{pct:.1}" data-delay-ms="{delay}"></div></div>
</div>
<div class="severity-breakdown">
<span class="sev sev-high">High: {high}</span>
<span class="sev sev-medium">Medium: {medium}</span>
<span class="sev sev-low">Low: {low}</span>
</div>
</section>"#,
        total = format_number(analysis.total_comments),
        safe = format_number(analysis.safe_count),
        flagged = format_number(analysis.flagged_count),
        pct_text = format_percent(pct),
        class = level.css_class(),
        delay = INDICATOR_DELAY.as_millis(),
        high = format_number(analysis.high_severity),
        medium = format_number(analysis.medium_severity),
        low = format_number(analysis.low_severity),
    )
}
