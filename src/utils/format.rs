//! Timestamp formatting
//!
//! ITCH timestamps count nanoseconds since midnight, Eastern time. These helpers
//! render them as wall-clock times for logs and reports.

use chrono::{NaiveTime, Timelike};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Convert nanoseconds since midnight to a wall-clock time.
///
/// Returns `None` for timestamps at or beyond 24 hours.
pub fn timestamp_to_time(timestamp: u64) -> Option<NaiveTime> {
    let secs = u32::try_from(timestamp / NANOS_PER_SECOND).ok()?;
    let nanos = (timestamp % NANOS_PER_SECOND) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
}

/// Convert a wall-clock time to nanoseconds since midnight.
pub fn time_to_timestamp(time: NaiveTime) -> u64 {
    time.num_seconds_from_midnight() as u64 * NANOS_PER_SECOND + time.nanosecond() as u64
}

/// Format a timestamp as `HH:MM:SS.nnnnnnnnn`.
///
/// Out-of-range timestamps fall back to the raw nanosecond count.
pub fn format_timestamp(timestamp: u64) -> String {
    match timestamp_to_time(timestamp) {
        Some(time) => time.format("%H:%M:%S%.9f").to_string(),
        None => format!("{}ns", timestamp),
    }
}
