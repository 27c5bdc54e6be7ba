// Unit tests for formatting helpers: relative date buckets at their
// boundaries, statistic formatting, and percentage rendering.

use chrono::{DateTime, Duration, TimeZone, Utc};

use cinder::format::{format_count, format_number, format_percent, format_relative_date};
use cinder::models::Count;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn days_ago(days: i64) -> Option<DateTime<Utc>> {
    Some(now() - Duration::days(days))
}

// ============================================================
// format_relative_date: bucket boundaries
// ============================================================

#[test]
fn same_instant_is_today() {
    assert_eq!(format_relative_date(days_ago(0), now()), "Today");
}

#[test]
fn just_under_a_day_is_today() {
    let ts = Some(now() - Duration::hours(23) - Duration::minutes(59));
    assert_eq!(format_relative_date(ts, now()), "Today");
}

#[test]
fn future_timestamp_is_today() {
    assert_eq!(format_relative_date(days_ago(-3), now()), "Today");
}

#[test]
fn one_day_is_yesterday() {
    assert_eq!(format_relative_date(days_ago(1), now()), "Yesterday");
}

#[test]
fn two_and_six_days() {
    assert_eq!(format_relative_date(days_ago(2), now()), "2 days ago");
    assert_eq!(format_relative_date(days_ago(6), now()), "6 days ago");
}

#[test]
fn weeks_bucket() {
    assert_eq!(format_relative_date(days_ago(7), now()), "1 weeks ago");
    assert_eq!(format_relative_date(days_ago(10), now()), "1 weeks ago");
    assert_eq!(format_relative_date(days_ago(29), now()), "4 weeks ago");
}

#[test]
fn months_bucket() {
    assert_eq!(format_relative_date(days_ago(30), now()), "1 months ago");
    assert_eq!(format_relative_date(days_ago(364), now()), "12 months ago");
}

#[test]
fn years_bucket() {
    assert_eq!(format_relative_date(days_ago(365), now()), "1 years ago");
    assert_eq!(format_relative_date(days_ago(400), now()), "1 years ago");
    assert_eq!(format_relative_date(days_ago(800), now()), "2 years ago");
}

#[test]
fn missing_timestamp_is_empty() {
    assert_eq!(format_relative_date(None, now()), "");
}

// ============================================================
// Numbers
// ============================================================

#[test]
fn thousands_separators() {
    assert_eq!(format_number(0), "0");
    assert_eq!(format_number(999), "999");
    assert_eq!(format_number(1000), "1,000");
    assert_eq!(format_number(1234567), "1,234,567");
}

#[test]
fn zero_count_is_not_unavailable() {
    assert_eq!(format_count(Count::Known(0)), "0");
    assert_eq!(format_count(Count::Unavailable), "N/A");
}

#[test]
fn percent_drops_trailing_zero() {
    assert_eq!(format_percent(40.0), "40%");
    assert_eq!(format_percent(12.5), "12.5%");
    assert_eq!(format_percent(33.333), "33.3%");
}
