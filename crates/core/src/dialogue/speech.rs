//! Fixed spoken templates
//!
//! The orchestrator falls back to these whenever the model's text cannot be
//! trusted (restatement mismatch) or when there is no model text to speak
//! (booking outcomes, timeouts). Kept in one place so the voice of the
//! agent stays consistent.

use chrono::{NaiveDate, NaiveTime};
use tara_domain::BookingDraft;

/// Apology when an upstream call exceeded its bound.
pub const TIMEOUT_APOLOGY: &str =
    "I'm sorry, I'm having a little trouble on my end. Could you say that again?";

/// Apology when the calendar call failed transiently.
pub const BOOKING_FAILED_APOLOGY: &str =
    "I'm sorry, I wasn't able to create the event just now. Would you like me to try again?";

/// Non-retryable error when calendar credentials are rejected.
pub const BOOKING_UNAVAILABLE: &str =
    "I'm sorry, I can't reach the calendar right now, so I'm unable to book meetings. Please try again later.";

/// Spoken while the booking directive is still on its way.
pub const CONFIRM_ACK: &str = "Great — one moment while I book that.";

/// Fallback when a proposal is declined with no model text to relay.
pub const ASK_WHAT_TO_CHANGE: &str = "No problem — what would you like to change?";

/// Spoken date, e.g. "Monday, February 23, 2026".
pub fn spoken_date(date: &NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Spoken time, e.g. "2:00 PM".
pub fn spoken_time(time: &NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Read-back restatement asking for confirmation. `None` until the draft is
/// complete.
pub fn restatement(draft: &BookingDraft) -> Option<String> {
    let name = draft.attendee_name.as_deref()?;
    let date = draft.date.as_ref()?;
    let time = draft.time.as_ref()?;
    let title = draft.title_or_default()?;

    Some(format!(
        "Just to confirm — I'll book '{title}' for {name} on {} at {} UTC. Does that sound right?",
        spoken_date(date),
        spoken_time(time),
    ))
}

/// Final confirmation sentence after a successful booking.
pub fn booking_confirmation(
    name: &str,
    date: &NaiveDate,
    time: &NaiveTime,
    title: &str,
) -> String {
    format!(
        "Done! I've booked '{title}' for {name} on {} at {} UTC. You're all set!",
        spoken_date(date),
        spoken_time(time),
    )
}

#[cfg(test)]
mod tests {
    use tara_domain::utils::time::parse_time_of_day;

    use super::*;

    #[test]
    fn restatement_requires_complete_draft() {
        let mut draft = BookingDraft::default();
        assert!(restatement(&draft).is_none());

        draft.attendee_name = Some("John Smith".into());
        draft.date = Some("2026-02-23".parse().unwrap());
        draft.time = parse_time_of_day("14:00");

        let text = restatement(&draft).unwrap();
        assert!(text.contains("'Meeting with John Smith'"));
        assert!(text.contains("Monday, February 23, 2026"));
        assert!(text.contains("2:00 PM"));
    }

    #[test]
    fn confirmation_sentence() {
        let text = booking_confirmation(
            "John Smith",
            &"2026-02-23".parse().unwrap(),
            &parse_time_of_day("14:00").unwrap(),
            "Project Kickoff",
        );
        assert_eq!(
            text,
            "Done! I've booked 'Project Kickoff' for John Smith on Monday, February 23, 2026 at 2:00 PM UTC. You're all set!"
        );
    }
}
