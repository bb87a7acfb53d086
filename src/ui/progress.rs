//! Human readable ages for cache entries and observations.

use std::time::Duration;

/// Format an age (e.g., "15 minutes ago").
pub fn format_age(age: Duration) -> String {
    describe_elapsed(age.as_secs())
}

fn describe_elapsed(seconds: u64) -> String {
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days == 1 {
        "yesterday".to_string()
    } else {
        format!("{} days ago", days)
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
