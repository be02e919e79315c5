//! Booking draft, extraction, directive and session state types

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::default_event_title;

/// The model's per-turn view of the four booking fields.
///
/// Carried alongside every conversational reply so the orchestrator, not the
/// model, owns accumulation. All fields optional; absent means the model
/// could not resolve the field from the transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftExtraction {
    pub attendee_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub title: Option<String>,
}

/// The accumulating extraction target for one conversation.
///
/// Owned exclusively by the dialogue orchestrator and discarded when the
/// conversation ends. A booking call may be attempted only when
/// [`BookingDraft::is_complete`] holds and `confirmed` is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub attendee_name: Option<String>,
    pub date: Option<NaiveDate>,
    /// Time of day, interpreted in UTC.
    pub time: Option<NaiveTime>,
    pub title: Option<String>,
    pub confirmed: bool,
}

impl BookingDraft {
    /// All required fields present (title is optional; it defaults).
    pub fn is_complete(&self) -> bool {
        self.attendee_name.is_some() && self.date.is_some() && self.time.is_some()
    }

    /// Title to book with, falling back to the placeholder.
    pub fn title_or_default(&self) -> Option<String> {
        let name = self.attendee_name.as_deref()?;
        Some(
            self.title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| default_event_title(name)),
        )
    }

    /// Monotonic merge used while collecting: a resolved field overwrites,
    /// an unresolved field never clears what is already held.
    pub fn absorb(&mut self, extraction: &DraftExtraction) {
        if let Some(name) = non_blank(&extraction.attendee_name) {
            self.attendee_name = Some(name);
        }
        if let Some(date) = extraction.date {
            self.date = Some(date);
        }
        if let Some(time) = extraction.time {
            self.time = Some(time);
        }
        if let Some(title) = non_blank(&extraction.title) {
            self.title = Some(title);
        }
    }

    /// Field-by-field replacement used after a declined proposal: every
    /// field takes the fresh extraction's value, so a disputed field the
    /// model no longer resolves is unset while undisputed fields survive
    /// through re-extraction. Always clears `confirmed`.
    pub fn reconcile(&mut self, extraction: &DraftExtraction) {
        self.attendee_name = non_blank(&extraction.attendee_name);
        self.date = extraction.date;
        self.time = extraction.time;
        self.title = non_blank(&extraction.title);
        self.confirmed = false;
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// The language model's structured booking intent.
///
/// Untrusted input: every field is re-validated against the grounding
/// context and the draft invariants before any side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDirective {
    /// The user's full name.
    pub name: String,
    /// Meeting start in ISO 8601, e.g. `2026-02-23T14:00:00`.
    pub datetime: String,
    /// Optional meeting title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Identifier of a created calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventId(pub String);

/// Dialogue state tag for one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Gathering required fields.
    Collecting,
    /// All fields held; awaiting explicit confirmation.
    Proposing,
    /// User affirmed; awaiting the booking directive.
    Confirmed,
    /// Terminal: event created.
    Booked,
    /// Terminal: booking impossible (calendar credentials rejected).
    Failed,
    /// Terminal: conversation ended without booking.
    Abandoned,
}

impl DialogueState {
    /// Terminal states accept no further dialogue.
    pub fn is_terminal(self) -> bool {
        matches!(self, DialogueState::Booked | DialogueState::Failed | DialogueState::Abandoned)
    }
}

/// Per-conversation session entry held by the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub draft: BookingDraft,
    pub state: DialogueState,
    /// Confirmation sentence retained after a successful booking so replayed
    /// directives are acknowledged without a second calendar call.
    pub confirmation: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self { draft: BookingDraft::default(), state: DialogueState::Collecting, confirmation: None }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
