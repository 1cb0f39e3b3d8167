//! Human-readable ages for "last updated" timestamps.

use chrono::{DateTime, Utc};
use pantrymap_core::{NEVER_PLACEHOLDER, UNKNOWN_PLACEHOLDER};

/// Day-granular age used in the pantry list and map popups.
///
/// Timestamps in the future count as today.
#[must_use]
pub fn days_ago(updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(updated) = updated else {
        return UNKNOWN_PLACEHOLDER.to_string();
    };

    let days = (now - updated).num_days().max(0).unsigned_abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural(days / 7, "week"),
        _ => plural(days / 30, "month"),
    }
}

/// Minute/hour-granular age used for status reports.
///
/// Older than a day falls back to a long-form date.
#[must_use]
pub fn report_age(updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(updated) = updated else {
        return NEVER_PLACEHOLDER.to_string();
    };

    let millis = (now - updated).num_milliseconds().unsigned_abs();
    let seconds = round_div(millis, 1000);
    let minutes = round_div(seconds, 60);
    let hours = round_div(minutes, 60);

    if hours < 1 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else {
        updated.format("%B %-d, %Y, %-I:%M %p").to_string()
    }
}

fn round_div(value: u64, divisor: u64) -> u64 {
    (value + divisor / 2) / divisor
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
