//! Human-readable size and age formatting.

use std::time::SystemTime;

const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count in human-readable 1024-based units.
///
/// `None` renders as `"-"`. Decimal places: none for bytes or values of 10
/// and above, one otherwise (`1.0 KB`, `15 KB`).
pub fn human_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) => b,
        None => return "-".to_string(),
    };

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} B", bytes)
    } else if size >= 10.0 {
        format!("{:.0} {}", size, UNITS[unit_idx])
    } else {
        format!("{:.1} {}", size, UNITS[unit_idx])
    }
}

const YEAR: u64 = 31_536_000;
const MONTH: u64 = 2_592_000;
const DAY: u64 = 86_400;
const HOUR: u64 = 3_600;
const MINUTE: u64 = 60;

/// Format an instant as a relative age like `"3d ago"`.
///
/// Future instants clamp to `"0s ago"`; a missing instant renders as `""`.
pub fn time_ago(instant: Option<SystemTime>, now: SystemTime) -> String {
    let instant = match instant {
        Some(t) => t,
        None => return String::new(),
    };

    let seconds = now
        .duration_since(instant)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let (count, unit) = if seconds >= YEAR {
        (seconds / YEAR, "y")
    } else if seconds >= MONTH {
        (seconds / MONTH, "mo")
    } else if seconds >= DAY {
        (seconds / DAY, "d")
    } else if seconds >= HOUR {
        (seconds / HOUR, "h")
    } else if seconds >= MINUTE {
        (seconds / MINUTE, "m")
    } else {
        (seconds, "s")
    };

    format!("{}{} ago", count, unit)
}
