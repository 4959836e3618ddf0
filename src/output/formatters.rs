//! Reusable formatting utilities for CLI output
//!
//! Timestamps, call durations, and money values used across the display
//! models.

use chrono::{DateTime, Local, Utc};

/// Format an RFC 3339 timestamp as local date/time.
///
/// Returns "N/A" for missing values and the input unchanged if it does not
/// parse.
///
/// # Example output
/// `2025-01-15 14:30`
pub fn format_timestamp_local(timestamp: Option<&str>) -> String {
    let Some(timestamp) = timestamp.filter(|t| !t.is_empty()) else {
        return "N/A".to_string();
    };

    match timestamp.parse::<DateTime<Utc>>() {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Format a call duration.
///
/// # Example output
/// - `1h 2m 5s`
/// - `5m 10s`
/// - `45s`
pub fn format_duration_seconds(seconds: Option<u64>) -> String {
    let Some(secs) = seconds.filter(|s| *s > 0) else {
        return "N/A".to_string();
    };

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Format a cost in account currency with two decimals
pub fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(c) => format!("${:.2}", c),
        None => "-".to_string(),
    }
}

/// Truncate to `max_len` characters, adding an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// `-` for absent optional columns
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_local_valid() {
        let result = format_timestamp_local(Some("2025-01-15T12:00:00Z"));
        assert!(result.starts_with("2025-01-1"));
    }

    #[test]
    fn test_format_timestamp_local_missing() {
        assert_eq!(format_timestamp_local(None), "N/A");
        assert_eq!(format_timestamp_local(Some("")), "N/A");
    }

    #[test]
    fn test_format_timestamp_local_unparseable() {
        assert_eq!(format_timestamp_local(Some("yesterday")), "yesterday");
    }

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration_seconds(Some(3725)), "1h 2m 5s");
        assert_eq!(format_duration_seconds(Some(125)), "2m 5s");
        assert_eq!(format_duration_seconds(Some(45)), "45s");
        assert_eq!(format_duration_seconds(Some(0)), "N/A");
        assert_eq!(format_duration_seconds(None), "N/A");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(Some(0.126)), "$0.13");
        assert_eq!(format_cost(None), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("You are a helpful receptionist", 12), "You are a...");
    }
}
