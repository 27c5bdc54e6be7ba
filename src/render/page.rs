// The dashboard page shell served at `/`.
//
// Static markup only: results are rendered server-side and injected by the
// page script after each fetch or filter change.

use crate::fetch::TriggerState;
use crate::filter::FilterSelector;

const STYLES: &str = include_str!("assets/dashboard.css");
const SCRIPT: &str = include_str!("assets/dashboard.js");

pub fn render_page() -> String {
    let options: String = FilterSelector::ALL
        .iter()
        .map(|s| {
            format!(
                r#"<option value="{value}" data-label="{label}">{label}</option>"#,
                value = s.as_str(),
                label = s.label()
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Cinder · YouTube Comment Toxicity Analyzer</title>
<style>{STYLES}</style>
</head>
<body>
<main class="container">
<header class="hero">
<h1>Cinder</h1>
<p class="subtitle">Paste a YouTube link to triage its comments for toxicity.</p>
</header>
<div class="input-row">
<input type="text" id="youtubeUrl" placeholder="https://www.youtube.com/watch?v=..." autocomplete="off">
<button id="analyzeBtn" data-idle-label="{idle}" data-busy-label="{busy}"><span class="btn-text">{idle}</span><span class="btn-loader" hidden></span></button>
</div>
<div class="error-banner" id="errorDisplay" hidden><span id="errorMessage"></span></div>
<div class="toolbar" id="toolbar" hidden>
<label for="filterSelect">Show</label>
<select id="filterSelect">{options}</select>
<button id="reportBtn" class="secondary">Download PDF Report</button>
</div>
<div id="results"></div>
</main>
<script>{SCRIPT}</script>
</body>
</html>"#,
        idle = TriggerState::Idle.label(),
        busy = TriggerState::Busy.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lists_every_filter_option() {
        let html = render_page();
        for selector in FilterSelector::ALL {
            assert!(html.contains(&format!(r#"<option value="{}""#, selector.as_str())));
        }
    }

    #[test]
    fn trigger_starts_idle() {
        assert!(render_page().contains(r#"<span class="btn-text">Analyze Comments</span>"#));
    }
}
