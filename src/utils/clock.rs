//! Wall-clock reads for the timer

use chrono::Utc;

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Wall-clock rather than monotonic so that time spent suspended counts
/// as time away from the keyboard.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
