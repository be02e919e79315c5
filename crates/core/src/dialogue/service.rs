//! Dialogue orchestration service - core business logic

use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use tara_domain::{
    constants::{DEFAULT_CALENDAR_TIMEOUT_SECS, DEFAULT_LLM_TIMEOUT_SECS},
    BookingDraft, DialogueState, DraftExtraction, GroundingContext, Result, Session,
    SpokenResponse, TaraError, ToolDirective, TurnRequest,
};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::affirmation::{self, Verdict};
use super::ports::{CalendarGateway, CompletionOutcome, LanguageModel, SessionStore};
use super::speech;
use super::validate::{validate_directive, DirectiveIssue, ValidatedBooking};
use crate::grounding;

/// Dialogue orchestrator for the scheduling conversation.
///
/// Holds no per-conversation data itself; sessions live in the store and
/// each turn locks exactly one of them. The model's output is treated as
/// advisory content to speak; the booking decision is made here, from the
/// orchestrator's own validated state.
pub struct DialogueService {
    language_model: Arc<dyn LanguageModel>,
    calendar: Arc<dyn CalendarGateway>,
    sessions: Arc<dyn SessionStore>,
    llm_timeout: Duration,
    calendar_timeout: Duration,
}

impl DialogueService {
    /// Create a new dialogue service with default call bounds.
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        calendar: Arc<dyn CalendarGateway>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            language_model,
            calendar,
            sessions,
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            calendar_timeout: Duration::from_secs(DEFAULT_CALENDAR_TIMEOUT_SECS),
        }
    }

    /// Override the per-call bounds (from configuration).
    pub fn with_timeouts(mut self, llm: Duration, calendar: Duration) -> Self {
        self.llm_timeout = llm;
        self.calendar_timeout = calendar;
        self
    }

    /// Run one turn of the conversation.
    ///
    /// Deterministic given the turn history and the grounding context; the
    /// only external non-determinism is the model's natural-language output.
    /// Always resolves to text to speak: dialogue-level failures (validation,
    /// timeouts, duplicate directives) never surface as errors.
    pub async fn step(
        &self,
        request: &TurnRequest,
        ctx: GroundingContext,
    ) -> Result<SpokenResponse> {
        let conversation_id = request.conversation_id.as_str();
        let entry = self.sessions.checkout(conversation_id).await;
        let mut session = entry.lock().await;

        // Replay guard: a booked conversation answers with its retained
        // confirmation and never reaches the calendar again.
        if session.state == DialogueState::Booked {
            info!(conversation_id, "turn after booking; replaying confirmation");
            let confirmation = session
                .confirmation
                .clone()
                .ok_or_else(|| TaraError::Internal("booked session lost confirmation".into()))?;
            return Ok(SpokenResponse::new(confirmation));
        }
        if session.state == DialogueState::Failed {
            return Ok(SpokenResponse::new(speech::BOOKING_UNAVAILABLE));
        }

        let prompt = grounding::system_prompt(&ctx);
        let history = request.history();

        let outcome =
            match timeout(self.llm_timeout, self.language_model.complete(&prompt, &history)).await
            {
                Err(_) => {
                    warn!(conversation_id, "language model call exceeded bound");
                    return Ok(SpokenResponse::new(speech::TIMEOUT_APOLOGY));
                }
                Ok(Err(err)) => {
                    warn!(conversation_id, error = %err, label = err.label(), "language model call failed");
                    return Ok(SpokenResponse::new(speech::TIMEOUT_APOLOGY));
                }
                Ok(Ok(outcome)) => outcome,
            };

        let verdict = request.last_user_utterance().map(affirmation::classify);

        match outcome {
            CompletionOutcome::Directive(directive) => {
                self.handle_directive(&mut session, conversation_id, &directive, &ctx, verdict)
                    .await
            }
            CompletionOutcome::Reply { text, extraction } => {
                Ok(handle_reply(&mut session, conversation_id, text, &extraction, verdict))
            }
        }
    }

    /// End a conversation.
    ///
    /// Booked sessions are retained as the idempotency record so replays
    /// after hangup still answer with the prior confirmation; anything else
    /// becomes `Abandoned` and is evicted.
    pub async fn end(&self, conversation_id: &str) -> Result<DialogueState> {
        let entry = self.sessions.checkout(conversation_id).await;
        let mut session = entry.lock().await;

        if session.state == DialogueState::Booked {
            return Ok(DialogueState::Booked);
        }

        transition(&mut session, conversation_id, DialogueState::Abandoned);
        drop(session);
        self.sessions.evict(conversation_id).await;
        Ok(DialogueState::Abandoned)
    }

    /// A validated or rejected tool directive.
    async fn handle_directive(
        &self,
        session: &mut Session,
        conversation_id: &str,
        directive: &ToolDirective,
        ctx: &GroundingContext,
        verdict: Option<Verdict>,
    ) -> Result<SpokenResponse> {
        let booking = match validate_directive(directive, ctx) {
            Err(issue) => {
                info!(conversation_id, issue = ?issue, "directive rejected by validation");
                unset_disputed_fields(&mut session.draft, issue);
                session.draft.confirmed = false;
                transition(session, conversation_id, DialogueState::Collecting);
                return Ok(SpokenResponse::new(issue.correction_prompt()));
            }
            Ok(booking) => booking,
        };

        // The directive is also the model's most complete extraction; keep
        // the draft in lockstep with what will be read back or booked.
        absorb_booking(&mut session.draft, &booking);

        let affirmed = session.state == DialogueState::Confirmed
            || (session.state == DialogueState::Proposing && verdict == Some(Verdict::Affirmative));

        if !affirmed {
            // The model claims the user confirmed; nothing this orchestrator
            // observed supports that. Propose instead of booking.
            warn!(conversation_id, state = ?session.state, "directive without observed affirmation");
            transition(session, conversation_id, DialogueState::Proposing);
            let text = speech::restatement(&session.draft)
                .ok_or_else(|| TaraError::Internal("complete draft failed to restate".into()))?;
            return Ok(SpokenResponse::new(text));
        }

        session.draft.confirmed = true;
        transition(session, conversation_id, DialogueState::Confirmed);
        self.book(session, conversation_id, &booking).await
    }

    /// Execute the at-most-once booking call.
    async fn book(
        &self,
        session: &mut Session,
        conversation_id: &str,
        booking: &ValidatedBooking,
    ) -> Result<SpokenResponse> {
        let call = self.calendar.create_event(
            &booking.attendee_name,
            booking.start(),
            &booking.title,
        );

        match timeout(self.calendar_timeout, call).await {
            Err(_) => {
                warn!(conversation_id, "calendar call exceeded bound");
                retreat_to_proposing(session, conversation_id);
                Ok(SpokenResponse::new(speech::BOOKING_FAILED_APOLOGY))
            }
            Ok(Err(TaraError::Auth(message))) => {
                error!(conversation_id, %message, "calendar credentials rejected");
                transition(session, conversation_id, DialogueState::Failed);
                Ok(SpokenResponse::new(speech::BOOKING_UNAVAILABLE))
            }
            Ok(Err(err)) => {
                warn!(conversation_id, error = %err, label = err.label(), "calendar call failed");
                retreat_to_proposing(session, conversation_id);
                Ok(SpokenResponse::new(speech::BOOKING_FAILED_APOLOGY))
            }
            Ok(Ok(event_id)) => {
                let confirmation = speech::booking_confirmation(
                    &booking.attendee_name,
                    &booking.date,
                    &booking.time,
                    &booking.title,
                );
                transition(session, conversation_id, DialogueState::Booked);
                session.confirmation = Some(confirmation.clone());
                info!(conversation_id, event_id = %event_id.0, "event booked");
                Ok(SpokenResponse::new(confirmation))
            }
        }
    }
}

/// A conversational reply (no directive this turn).
fn handle_reply(
    session: &mut Session,
    conversation_id: &str,
    text: String,
    extraction: &DraftExtraction,
    verdict: Option<Verdict>,
) -> SpokenResponse {
    match session.state {
        DialogueState::Collecting => {
            session.draft.absorb(extraction);
            if session.draft.is_complete() {
                transition(session, conversation_id, DialogueState::Proposing);
                SpokenResponse::new(checked_restatement(&session.draft, text))
            } else {
                // Relay the model's clarifying question verbatim.
                SpokenResponse::new(text)
            }
        }
        DialogueState::Proposing => match verdict {
            Some(Verdict::Affirmative) => {
                session.draft.absorb(extraction);
                session.draft.confirmed = true;
                transition(session, conversation_id, DialogueState::Confirmed);
                let speak =
                    if text.trim().is_empty() { speech::CONFIRM_ACK.to_string() } else { text };
                SpokenResponse::new(speak)
            }
            Some(Verdict::Negative) => {
                session.draft.reconcile(extraction);
                transition(session, conversation_id, DialogueState::Collecting);
                let speak = if text.trim().is_empty() {
                    speech::ASK_WHAT_TO_CHANGE.to_string()
                } else {
                    text
                };
                SpokenResponse::new(speak)
            }
            _ => {
                // Ambiguous ("maybe", "what time was that?"): never advance.
                // The utterance may still carry a field (the optional title,
                // typically), so absorb before repeating the read-back with
                // current values.
                session.draft.absorb(extraction);
                debug!(conversation_id, "ambiguous reply at proposal; repeating restatement");
                let speak = speech::restatement(&session.draft).unwrap_or(text);
                SpokenResponse::new(speak)
            }
        },
        DialogueState::Confirmed => match verdict {
            Some(Verdict::Negative) => {
                session.draft.reconcile(extraction);
                transition(session, conversation_id, DialogueState::Collecting);
                SpokenResponse::new(text)
            }
            _ => {
                // Still waiting for the model to emit the directive.
                session.draft.absorb(extraction);
                SpokenResponse::new(text)
            }
        },
        // Terminal states are answered before the model is ever called.
        DialogueState::Booked | DialogueState::Failed | DialogueState::Abandoned => {
            SpokenResponse::new(text)
        }
    }
}

/// Cross-check gate for the model's read-back: it must mention the attendee
/// name, the day of month and the time the orchestrator holds, otherwise
/// the fixed template speaks instead of invented values.
fn checked_restatement(draft: &BookingDraft, model_text: String) -> String {
    if mentions_held_values(&model_text, draft) {
        model_text
    } else {
        speech::restatement(draft).unwrap_or(model_text)
    }
}

fn mentions_held_values(text: &str, draft: &BookingDraft) -> bool {
    let lowered = text.to_lowercase();

    let name_ok = draft
        .attendee_name
        .as_deref()
        .is_some_and(|name| lowered.contains(&name.to_lowercase()));
    let date_ok = draft.date.is_some_and(|date| lowered.contains(&date.day().to_string()));
    let time_ok = draft.time.is_some_and(|time| {
        let twelve_hour = time.format("%-I:%M").to_string();
        let twenty_four_hour = time.format("%H:%M").to_string();
        lowered.contains(&twelve_hour) || lowered.contains(&twenty_four_hour)
    });

    name_ok && date_ok && time_ok
}

/// Unset exactly the fields a validation issue disputes, preserving
/// everything already agreed.
fn unset_disputed_fields(draft: &mut BookingDraft, issue: DirectiveIssue) {
    match issue {
        DirectiveIssue::EmptyName => draft.attendee_name = None,
        DirectiveIssue::MalformedDatetime => {
            draft.date = None;
            draft.time = None;
        }
        DirectiveIssue::PastDate => draft.date = None,
        DirectiveIssue::PastTimeToday => draft.time = None,
    }
}

fn absorb_booking(draft: &mut BookingDraft, booking: &ValidatedBooking) {
    draft.attendee_name = Some(booking.attendee_name.clone());
    draft.date = Some(booking.date);
    draft.time = Some(booking.time);
    draft.title = Some(booking.title.clone());
}

/// Transient booking failure: the user may confirm again, so the proposal
/// stands but the confirmation does not.
fn retreat_to_proposing(session: &mut Session, conversation_id: &str) {
    session.draft.confirmed = false;
    transition(session, conversation_id, DialogueState::Proposing);
}

fn transition(session: &mut Session, conversation_id: &str, to: DialogueState) {
    if session.state != to {
        debug!(conversation_id, from = ?session.state, to = ?to, "dialogue state transition");
        session.state = to;
    }
}
