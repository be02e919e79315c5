//! Port interfaces for the dialogue orchestrator

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tara_domain::{
    ConversationTurn, DraftExtraction, EventId, Result, Session, ToolDirective,
};
use tokio::sync::Mutex;

/// Outcome of one language-model completion.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// Conversational reply plus the model's current view of the booking
    /// fields.
    Reply {
        text: String,
        extraction: DraftExtraction,
    },
    /// Structured booking intent. Untrusted until validated.
    Directive(ToolDirective),
}

/// Trait for the language-model black box.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one completion over the grounded system prompt and the
    /// conversation history.
    async fn complete(
        &self,
        system_prompt: &str,
        turns: &[ConversationTurn],
    ) -> Result<CompletionOutcome>;
}

/// Trait for the calendar provider.
///
/// The provider is idempotency-unaware: callers must guarantee at most one
/// invocation per conversation.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// Create a one-hour event starting at `start` (UTC).
    async fn create_event(
        &self,
        attendee_name: &str,
        start: DateTime<Utc>,
        title: &str,
    ) -> Result<EventId>;
}

/// Handle to one conversation's session, locked for the duration of a turn.
pub type SharedSession = Arc<Mutex<Session>>;

/// Keyed store: conversation id → session.
///
/// Entries are created on first turn. The per-entry mutex serializes
/// overlapping requests for the same conversation so two turns can never
/// both observe a confirmed draft and both book.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get or create the session for a conversation.
    async fn checkout(&self, conversation_id: &str) -> SharedSession;

    /// Drop a conversation's session (terminal eviction).
    async fn evict(&self, conversation_id: &str);
}
