//! Grounding context snapshot

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Immutable "current instant" snapshot injected into every model call.
///
/// Captured once per inbound request from real wall-clock time and never
/// cached across requests, so relative date phrases resolve against the
/// moment the request was handled, not the moment the process started.
/// All fields are UTC; seconds are truncated since the dialogue reasons in
/// whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingContext {
    pub current_date: NaiveDate,
    pub current_time: NaiveTime,
}

impl GroundingContext {
    /// Snapshot an instant, truncating sub-minute precision.
    pub fn from_instant(now: DateTime<Utc>) -> Self {
        let time = now.time();
        let truncated = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
            .unwrap_or(time);
        Self { current_date: now.date_naive(), current_time: truncated }
    }

    /// Weekday of the snapshot date, needed to resolve "next Monday"-style
    /// phrases deterministically.
    pub fn weekday(&self) -> Weekday {
        self.current_date.weekday()
    }

    /// Spoken form of the date, e.g. "Friday, February 20, 2026".
    pub fn date_spoken(&self) -> String {
        self.current_date.format("%A, %B %-d, %Y").to_string()
    }

    /// Spoken form of the time, e.g. "9:05 AM".
    pub fn time_spoken(&self) -> String {
        self.current_time.format("%-I:%M %p").to_string()
    }
}
