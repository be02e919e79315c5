//! Time-of-day parsing
//!
//! The model reports times as "HH:MM" (24-hour UTC) but occasionally pads
//! seconds on. Both forms are accepted; anything else is rejected rather
//! than guessed at.

use chrono::NaiveTime;

/// Parse a time-of-day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}
