//! Human-friendly duration strings.

use std::time::Duration;

use crate::error::{IpWeatherError, Result};

/// Parse a duration string like "1h", "30m", "90s" or "3600".
///
/// A bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let value = input.trim().to_lowercase();

    let (digits, multiplier) = if let Some(days) = value.strip_suffix('d') {
        (days, 86_400)
    } else if let Some(hours) = value.strip_suffix('h') {
        (hours, 3_600)
    } else if let Some(mins) = value.strip_suffix('m') {
        (mins, 60)
    } else if let Some(secs) = value.strip_suffix('s') {
        (secs, 1)
    } else {
        (value.as_str(), 1)
    };

    let n: u64 = digits.trim().parse().map_err(|_| IpWeatherError::Config {
        message: format!("invalid duration '{}' (expected e.g. 30m, 1h, 90s)", input),
    })?;

    n.checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| IpWeatherError::Config {
            message: format!("duration '{}' is too large", input),
        })
}

/// Format a duration for display, using its largest whole unit.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs >= 86_400 && secs % 86_400 == 0 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3_600 && secs % 3_600 == 0 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}
