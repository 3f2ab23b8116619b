use chrono::{Local, TimeZone};

/// Format a millisecond timestamp as a local date-time string, or a
/// placeholder when the timestamp does not resolve.
pub fn format_timestamp(ts_millis: i64) -> String {
    match Local.timestamp_millis_opt(ts_millis) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        _ => "invalid timestamp".to_string(),
    }
}

/// Format an optional millisecond timestamp, using '-' when missing.
pub fn format_timestamp_opt(ts: Option<i64>) -> String {
    ts.map(format_timestamp).unwrap_or_else(|| "-".to_string())
}

/// Format a millisecond timestamp as a local calendar date only.
pub fn format_date(ts_millis: i64) -> String {
    match Local.timestamp_millis_opt(ts_millis) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => "invalid timestamp".to_string(),
    }
}
