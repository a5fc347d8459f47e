//! Human-readable duration rendering.

use std::time::Duration;

/// Formats a duration at millisecond precision, scaling the unit to its
/// magnitude: `412ms`, `1.234s`, `2:05.318`, `1:02:05.318`.
///
/// Sub-millisecond remainders are truncated, matching the millisecond
/// resolution of the measurements being rendered.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let millis = total_ms % 1000;
    let seconds = (total_ms / 1000) % 60;
    let minutes = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}")
    } else if minutes > 0 {
        format!("{minutes}:{seconds:02}.{millis:03}")
    } else if seconds > 0 {
        format!("{seconds}.{millis:03}s")
    } else {
        format!("{millis}ms")
    }
}
