//! Shared test helpers for `tara-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that the
//! dialogue tests can focus on behaviour instead of boilerplate.

pub mod calendar;
pub mod llm;
pub mod store;

use chrono::{TimeZone, Utc};
use tara_domain::{ConversationTurn, GroundingContext, TurnRequest};

/// Friday 2026-02-20, 09:00 UTC: the reference instant used across the
/// dialogue tests.
pub fn friday_morning() -> GroundingContext {
    GroundingContext::from_instant(Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap())
}

/// Build a turn request from alternating user/assistant contents, starting
/// with a user turn.
pub fn request_with_history(conversation_id: &str, contents: &[&str]) -> TurnRequest {
    let messages = contents
        .iter()
        .enumerate()
        .map(|(i, content)| {
            if i % 2 == 0 {
                ConversationTurn::user(*content)
            } else {
                ConversationTurn::assistant(*content)
            }
        })
        .collect();
    TurnRequest { conversation_id: conversation_id.to_string(), messages }
}
