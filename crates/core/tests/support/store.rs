//! Minimal in-memory `SessionStore` for dialogue tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tara_core::dialogue::ports::{SessionStore, SharedSession};
use tara_domain::Session;

#[derive(Default, Clone)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, SharedSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session currently exists for the conversation.
    pub fn contains(&self, conversation_id: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(conversation_id)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn checkout(&self, conversation_id: &str) -> SharedSession {
        self.sessions
            .lock()
            .unwrap()
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(Session::new())))
            .clone()
    }

    async fn evict(&self, conversation_id: &str) {
        self.sessions.lock().unwrap().remove(conversation_id);
    }
}
