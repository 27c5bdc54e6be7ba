// Formatting helpers shared by the HTML view, the terminal view, and the
// report composer. All pure functions.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::Count;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Format an integer with thousands separators (1234567 -> "1,234,567").
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a backend statistic. `Unavailable` renders as "N/A".
pub fn format_count(count: Count) -> String {
    match count {
        Count::Known(n) => format_number(n),
        Count::Unavailable => "N/A".to_string(),
    }
}

/// Humanize a publish timestamp relative to `now`.
///
/// Uses the floor of the whole-day difference. Timestamps in the future
/// count as "Today"; a missing timestamp yields an empty string.
pub fn format_relative_date(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = timestamp else {
        return String::new();
    };

    let days = (now - ts).num_milliseconds().div_euclid(MILLIS_PER_DAY);
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

/// Long-form date for the report header, e.g. "October 19, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Uppercase the first character and lowercase the rest ("HIGH" -> "High").
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Format a percentage with at most one decimal place ("12.5%", "40%").
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}%")
    } else {
        format!("{rounded:.1}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn unavailable_count_passes_through() {
        assert_eq!(format_count(Count::Unavailable), "N/A");
        assert_eq!(format_count(Count::Known(12000)), "12,000");
    }

    #[test]
    fn partial_day_floors_to_today() {
        let now = Utc::now();
        assert_eq!(format_relative_date(Some(now - Duration::hours(23)), now), "Today");
        assert_eq!(format_relative_date(Some(now - Duration::hours(25)), now), "Yesterday");
    }

    #[test]
    fn future_timestamp_is_today() {
        let now = Utc::now();
        assert_eq!(format_relative_date(Some(now + Duration::days(3)), now), "Today");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(40.0), "40%");
        assert_eq!(format_percent(12.54), "12.5%");
    }
}
