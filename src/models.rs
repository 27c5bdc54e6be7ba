// Data models: the analysis backend's response contract.
//
// These are the types that flow through the application: the fetch
// controller decodes them, the store holds them, and the render pipeline and
// report composer read them. Field names follow the backend's camelCase JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A statistic the backend may or may not be able to report.
///
/// The backend forwards YouTube statistics verbatim, so a count can arrive
/// as a JSON number, a numeric string (`"12345"`), or the literal `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Count {
    Known(u64),
    #[default]
    Unavailable,
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Integer(u64),
            Float(f64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Integer(n)) => Count::Known(n),
            Some(Raw::Float(f)) if f.is_finite() && f >= 0.0 => Count::Known(f as u64),
            Some(Raw::Text(s)) => s
                .trim()
                .parse::<u64>()
                .map(Count::Known)
                .unwrap_or(Count::Unavailable),
            _ => Count::Unavailable,
        })
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Count::Known(n) => serializer.serialize_u64(*n),
            Count::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Snapshot of the analyzed video. Carries no identifier; replaced wholesale
/// on the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: Count,
    #[serde(default)]
    pub like_count: Count,
    #[serde(default)]
    pub comment_count: Count,
}

/// Classifier severity for a flagged comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Title-cased label used on badges and in the report table.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single top-level comment with its classification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_profile_image: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub is_flagged: bool,
    /// Only meaningful when `is_flagged` is true.
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Classifier certainty 0-100. Only meaningful when `is_flagged` is true.
    #[serde(default)]
    pub confidence: Option<u8>,
}

impl Comment {
    /// Severity of a flagged comment; `None` for safe comments.
    pub fn flagged_severity(&self) -> Option<Severity> {
        if self.is_flagged {
            self.severity
        } else {
            None
        }
    }

    /// Placeholder glyph for a missing avatar: the author's first character,
    /// uppercased, or `?` when the name is empty.
    pub fn initial(&self) -> String {
        match self.author.chars().next() {
            Some(c) => c.to_uppercase().collect(),
            None => "?".to_string(),
        }
    }

    /// The avatar URI, unless it is absent, empty, or YouTube's default image.
    pub fn avatar_url(&self) -> Option<&str> {
        self.author_profile_image
            .as_deref()
            .filter(|url| !url.trim().is_empty() && !url.contains("default"))
    }
}

/// Aggregate counts computed by the backend. Not re-derived locally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_comments: u64,
    pub safe_count: u64,
    pub flagged_count: u64,
    #[serde(default)]
    pub high_severity: u64,
    #[serde(default)]
    pub medium_severity: u64,
    #[serde(default)]
    pub low_severity: u64,
    /// 0-100, as computed server-side.
    #[serde(default)]
    pub toxicity_percentage: f64,
}

/// Successful response body of the analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default)]
    pub video: Option<VideoMetadata>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub analysis: Option<AnalysisSummary>,
    #[serde(default)]
    pub total_fetched: Option<u64>,
}

/// Failure response body: `{ "error": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_accepts_numbers_strings_and_sentinel() {
        let counts: Vec<Count> =
            serde_json::from_str(r#"[1234, "5678", "N/A", null, " 42 "]"#).unwrap();
        assert_eq!(
            counts,
            vec![
                Count::Known(1234),
                Count::Known(5678),
                Count::Unavailable,
                Count::Unavailable,
                Count::Known(42),
            ]
        );
    }

    #[test]
    fn initial_uppercases_first_char() {
        let mut c: Comment = serde_json::from_str(r#"{"author": "émile"}"#).unwrap();
        assert_eq!(c.initial(), "É");
        c.author.clear();
        assert_eq!(c.initial(), "?");
    }

    #[test]
    fn default_avatar_is_ignored() {
        let c: Comment = serde_json::from_str(
            r#"{"authorProfileImage": "https://yt3.ggpht.com/a/default-user=s48"}"#,
        )
        .unwrap();
        assert_eq!(c.avatar_url(), None);
    }

    #[test]
    fn unflagged_comment_has_no_severity() {
        let c: Comment =
            serde_json::from_str(r#"{"isFlagged": false, "severity": "high"}"#).unwrap();
        assert_eq!(c.flagged_severity(), None);
    }
}
