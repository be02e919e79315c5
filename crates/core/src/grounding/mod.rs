//! Context injector
//!
//! Produces the deterministic grounding block prepended to every model
//! invocation. Relative phrases like "tomorrow" or "next Monday" only
//! resolve reproducibly if the model is told the current date, weekday and
//! time, so the prompt is regenerated fresh for each request instead of
//! being rendered once at startup.

use chrono::{DateTime, Utc};
use tara_domain::GroundingContext;

/// Build the grounding context for a given instant. Pure; always succeeds.
pub fn build_context(now: DateTime<Utc>) -> GroundingContext {
    GroundingContext::from_instant(now)
}

/// Snapshot real wall-clock time. Called once per inbound request at the
/// API boundary; core logic and tests take the context as an argument.
pub fn capture_context() -> GroundingContext {
    build_context(Utc::now())
}

/// Render the full scheduling system prompt around the grounding block.
pub fn system_prompt(ctx: &GroundingContext) -> String {
    let date_spoken = ctx.date_spoken();
    let time_spoken = ctx.time_spoken();
    let today_iso = ctx.current_date.format("%Y-%m-%d");

    format!(
        "You are Tara, a friendly and professional scheduling assistant.\n\
         Today's date is {date_spoken} ({today_iso}) and the current time is {time_spoken} UTC.\n\
         Use this grounding to:\n\
         - Resolve relative dates like \"tomorrow\", \"next Monday\", \"this Thursday\".\n\
         - Roll a month-and-day with no year (e.g. \"February 25th\") to next year when it falls before today.\n\
         - Reject any date, or any time on today's date, that has already passed.\n\
         All times are stored in UTC; tell the user so when asking for a time.\n\
         \n\
         Collect, in order: the user's full name, the meeting date, the meeting time, and an\n\
         optional meeting title. Ask for one missing item at a time. If a date or time is\n\
         ambiguous (\"next week\", \"at 3\"), ask a clarifying question instead of guessing.\n\
         If the user wanders off topic, acknowledge briefly and steer back; you only help\n\
         with booking calendar events.\n\
         \n\
         Once every field is known, read ALL details back in one sentence, including the\n\
         resolved actual date and the UTC time, and ask whether that is right. Only after\n\
         the user explicitly says yes, call the createCalendarEvent function with the\n\
         date and time combined as ISO 8601 (for example 2026-02-20T14:00:00). Never call\n\
         the function before that explicit yes. If the user says no, ask what to change\n\
         and re-collect only that item.\n\
         \n\
         For every reply that is not a function call, respond with a JSON object:\n\
         {{\"reply\": \"<what to say to the user>\", \"fields\": {{\"name\": <string or null>,\n\
         \"date\": <\"YYYY-MM-DD\" or null>, \"time\": <\"HH:MM\" 24-hour UTC or null>,\n\
         \"title\": <string or null>}}}}.\n\
         `fields` is your current best extraction from the whole conversation; leave a\n\
         field null until the user has provided it unambiguously."
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn prompt_carries_date_weekday_and_time() {
        let now = Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap();
        let prompt = system_prompt(&build_context(now));

        assert!(prompt.contains("Friday, February 20, 2026"));
        assert!(prompt.contains("2026-02-20"));
        assert!(prompt.contains("9:00 AM"));
        assert!(prompt.contains("createCalendarEvent"));
    }

    #[test]
    fn context_is_pure_in_the_instant() {
        let now = Utc.with_ymd_and_hms(2026, 7, 4, 23, 59, 0).unwrap();
        assert_eq!(build_context(now), build_context(now));
    }
}
