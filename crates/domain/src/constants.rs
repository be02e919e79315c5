//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Fixed duration of every booked event.
pub const EVENT_DURATION_SECS: i64 = 3600;

/// Name of the booking tool exposed to the language model.
pub const BOOKING_TOOL_NAME: &str = "createCalendarEvent";

/// Default bound for a single language-model call.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Default bound for a single calendar call (token refresh + insert).
pub const DEFAULT_CALENDAR_TIMEOUT_SECS: u64 = 15;

/// Default language model served through the Groq OpenAI-compatible API.
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";

/// Build the placeholder title used when the user skips the title step.
pub fn default_event_title(attendee_name: &str) -> String {
    format!("Meeting with {attendee_name}")
}
