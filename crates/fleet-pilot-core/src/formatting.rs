//! Formatting utilities for consistent display across the dashboard
//!
//! Counts, percentages, relative ages and timestamps.

use chrono::{DateTime, Duration, Local};

/// Format an integer count with thousands separators
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::formatting::format_count;
///
/// assert_eq!(format_count(847), "847");
/// assert_eq!(format_count(52_384), "52,384");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a raw number the way the stats payload reports it, followed by `%`
///
/// Whole numbers print without a fractional part.
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::formatting::format_percent;
///
/// assert_eq!(format_percent(81.0), "81%");
/// assert_eq!(format_percent(78.4), "78.4%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

/// Format a percentage with an explicit sign and one decimal
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::formatting::format_signed_percent;
///
/// assert_eq!(format_signed_percent(95.83), "+95.8%");
/// assert_eq!(format_signed_percent(-22.4), "-22.4%");
/// ```
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

/// Percentage change from `before` to `after`
///
/// Returns 0 when `before` is zero.
pub fn percent_change(before: f64, after: f64) -> f64 {
    if before == 0.0 {
        0.0
    } else {
        (after - before) / before * 100.0
    }
}

/// Format how long ago something happened
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::formatting::format_age;
/// use chrono::Duration;
///
/// assert_eq!(format_age(Duration::minutes(14)), "14 mins ago");
/// assert_eq!(format_age(Duration::hours(1)), "1 hr ago");
/// ```
pub fn format_age(age: Duration) -> String {
    let secs = age.num_seconds().abs();
    let (n, unit) = if secs < 60 {
        (secs, "sec")
    } else if secs < 3600 {
        (secs / 60, "min")
    } else if secs < 86400 {
        (secs / 3600, "hr")
    } else {
        (secs / 86400, "day")
    };
    if n == 1 {
        format!("{} {} ago", n, unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Format a refresh timestamp for the header
pub fn format_timestamp(timestamp: DateTime<Local>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Format a refresh interval preset (e.g. "30 seconds", "5 minutes")
pub fn format_interval(secs: u64) -> String {
    if secs < 60 {
        format!("{} seconds", secs)
    } else if secs == 60 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", secs / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(60_000), "60,000");
        assert_eq!(format_count(100_000), "100,000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(14.0), "14%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(12.35), "12.35%");
    }

    #[test]
    fn test_percent_change() {
        assert!((percent_change(100.0, 72.0) - -28.0).abs() < 1e-9);
        assert_eq!(percent_change(0.0, 10.0), 0.0);
        assert_eq!(format_signed_percent(percent_change(120.0, 235.0)), "+95.8%");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::seconds(1)), "1 sec ago");
        assert_eq!(format_age(Duration::minutes(32)), "32 mins ago");
        assert_eq!(format_age(Duration::hours(3)), "3 hrs ago");
        assert_eq!(format_age(Duration::days(2)), "2 days ago");
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(5), "5 seconds");
        assert_eq!(format_interval(60), "1 minute");
        assert_eq!(format_interval(300), "5 minutes");
    }
}
