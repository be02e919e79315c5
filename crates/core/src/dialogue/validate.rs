//! Directive validation gate
//!
//! Every tool directive is untrusted input: the model may mis-do date math
//! and the user may name a past date. All checks run against the request's
//! grounding context regardless of what the model claims.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tara_domain::{constants::default_event_title, GroundingContext, ToolDirective};

/// A directive that survived validation, with fields normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub attendee_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub title: String,
}

impl ValidatedBooking {
    /// Event start as a UTC instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.date.and_time(self.time).and_utc()
    }
}

/// Why a directive was rejected. Each issue maps to a spoken correction and
/// to the draft fields that must be unset before re-collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveIssue {
    EmptyName,
    MalformedDatetime,
    PastDate,
    PastTimeToday,
}

impl DirectiveIssue {
    /// Correction prompt relayed to the voice layer.
    pub fn correction_prompt(self) -> &'static str {
        match self {
            DirectiveIssue::EmptyName => {
                "I didn't catch your name. Could you tell me your full name?"
            }
            DirectiveIssue::MalformedDatetime => {
                "I couldn't quite catch that date and time. Could you say them again?"
            }
            DirectiveIssue::PastDate => {
                "It looks like that date has already passed. Could you choose a date from today onwards?"
            }
            DirectiveIssue::PastTimeToday => {
                "That time has already passed today. Could you pick a later time, or would you prefer a different date?"
            }
        }
    }
}

/// Validate a directive against the grounding context.
pub fn validate_directive(
    directive: &ToolDirective,
    ctx: &GroundingContext,
) -> Result<ValidatedBooking, DirectiveIssue> {
    let attendee_name = directive.name.trim();
    if attendee_name.is_empty() {
        return Err(DirectiveIssue::EmptyName);
    }

    let start = parse_iso_datetime(&directive.datetime).ok_or(DirectiveIssue::MalformedDatetime)?;
    let date = start.date();
    let time = start.time();

    if date < ctx.current_date {
        return Err(DirectiveIssue::PastDate);
    }
    if date == ctx.current_date && time <= ctx.current_time {
        return Err(DirectiveIssue::PastTimeToday);
    }

    let title = directive
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| default_event_title(attendee_name));

    Ok(ValidatedBooking { attendee_name: attendee_name.to_owned(), date, time, title })
}

/// Parse an ISO 8601 datetime, with or without an offset. An explicit
/// offset is converted to UTC; a bare datetime is already UTC by policy.
fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Utc).naive_utc());
    }
    value.parse::<NaiveDateTime>().ok()
}
