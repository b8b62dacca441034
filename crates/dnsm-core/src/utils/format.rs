use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse the date shapes the API hands out into local wall-clock time.
/// Accepts RFC 3339, naive `YYYY-MM-DD[ T]HH:MM:SS`, bare dates and epoch
/// milliseconds.
fn parse_local(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        let millis = input.parse::<i64>().ok()?;
        return DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.with_timezone(&Local).naive_local());
    }
    None
}

fn format_with(input: &str, format: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    match parse_local(input) {
        Some(dt) => dt.format(format).to_string(),
        // Unparseable dates are shown as given
        None => input.to_string(),
    }
}

/// Format a date to `YYYY-MM-DD HH:MM`
pub fn format_datetime_to_minute(input: &str) -> String {
    format_with(input, MINUTE_FORMAT)
}

/// Format a date to `YYYY-MM-DD HH:MM:SS`
pub fn format_datetime_to_second(input: &str) -> String {
    format_with(input, SECOND_FORMAT)
}

fn format_timestamp(timestamp: Option<i64>, format: &str) -> String {
    match timestamp.filter(|t| *t != 0).and_then(|t| DateTime::from_timestamp(t, 0)) {
        Some(dt) => dt.with_timezone(&Local).format(format).to_string(),
        None => String::new(),
    }
}

/// Format a Unix timestamp in seconds to `YYYY-MM-DD HH:MM`
pub fn format_timestamp_to_minute(timestamp: Option<i64>) -> String {
    format_timestamp(timestamp, MINUTE_FORMAT)
}

/// Format a Unix timestamp in seconds to `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp_to_second(timestamp: Option<i64>) -> String {
    format_timestamp(timestamp, SECOND_FORMAT)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
