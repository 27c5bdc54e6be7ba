// Filter engine: derives the displayed subset of comments.
//
// Pure: never mutates the snapshot, always preserves fetched order.

use std::fmt;

use crate::models::{Comment, Severity};
use crate::state::AnalysisSnapshot;

/// Which subset of comments the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterSelector {
    #[default]
    All,
    Safe,
    Flagged,
    High,
}

impl FilterSelector {
    /// Every selector, in the order the dropdown lists them.
    pub const ALL: [FilterSelector; 4] = [
        FilterSelector::All,
        FilterSelector::Safe,
        FilterSelector::Flagged,
        FilterSelector::High,
    ];

    /// Parse a selector value. Unknown values fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "safe" => FilterSelector::Safe,
            "flagged" => FilterSelector::Flagged,
            "high" => FilterSelector::High,
            _ => FilterSelector::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterSelector::All => "all",
            FilterSelector::Safe => "safe",
            FilterSelector::Flagged => "flagged",
            FilterSelector::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterSelector::All => "All Comments",
            FilterSelector::Safe => "Safe Only",
            FilterSelector::Flagged => "Flagged Only",
            FilterSelector::High => "High Severity",
        }
    }

    /// Whether `comment` belongs to this selector's subset.
    pub fn matches(&self, comment: &Comment) -> bool {
        match self {
            FilterSelector::All => true,
            FilterSelector::Safe => !comment.is_flagged,
            FilterSelector::Flagged => comment.is_flagged,
            FilterSelector::High => comment.flagged_severity() == Some(Severity::High),
        }
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the displayed subset from a snapshot.
pub fn derive(snapshot: &AnalysisSnapshot, selector: FilterSelector) -> Vec<&Comment> {
    derive_from(&snapshot.comments, selector)
}

/// Derive the displayed subset from a comment sequence.
pub fn derive_from(comments: &[Comment], selector: FilterSelector) -> Vec<&Comment> {
    comments.iter().filter(|c| selector.matches(c)).collect()
}

/// Size of the subset `selector` would produce.
pub fn count(comments: &[Comment], selector: FilterSelector) -> usize {
    comments.iter().filter(|c| selector.matches(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_selector_falls_back_to_all() {
        assert_eq!(FilterSelector::parse("medium"), FilterSelector::All);
        assert_eq!(FilterSelector::parse(""), FilterSelector::All);
        assert_eq!(FilterSelector::parse("FLAGGED"), FilterSelector::Flagged);
    }

    #[test]
    fn parse_round_trips_every_selector() {
        for selector in FilterSelector::ALL {
            assert_eq!(FilterSelector::parse(selector.as_str()), selector);
        }
    }
}
