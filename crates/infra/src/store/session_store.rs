//! In-memory session store
//!
//! Conversations are independent, so the map is sharded (`DashMap`) and the
//! only cross-conversation state is the map itself. Each entry carries its
//! own async mutex; the orchestrator holds it for the whole turn, which
//! serializes overlapping requests for one conversation id.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tara_core::dialogue::ports::{SessionStore, SharedSession};
use tara_domain::Session;
use tokio::sync::Mutex;
use tracing::debug;

/// Process-local session store keyed by conversation id.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SharedSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions (includes retained booked records).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn checkout(&self, conversation_id: &str) -> SharedSession {
        self.sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                debug!(conversation_id, "creating session on first turn");
                Arc::new(Mutex::new(Session::new()))
            })
            .clone()
    }

    async fn evict(&self, conversation_id: &str) {
        if self.sessions.remove(conversation_id).is_some() {
            debug!(conversation_id, "session evicted");
        }
    }
}
