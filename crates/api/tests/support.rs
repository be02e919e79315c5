//! Shared helpers for router tests: mock ports and a wired test context.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tara_api::AppContext;
use tara_core::{CalendarGateway, CompletionOutcome, DialogueService, LanguageModel};
use tara_domain::{
    CalendarConfig, ConversationTurn, EventId, LlmConfig, Result, ServerConfig, TaraConfig,
};
use tara_infra::InMemorySessionStore;

/// Scripted language model: pops one outcome per call.
#[derive(Default, Clone)]
pub struct ScriptedModel {
    script: Arc<Mutex<VecDeque<CompletionOutcome>>>,
}

impl ScriptedModel {
    pub fn push(&self, outcome: CompletionOutcome) {
        self.script.lock().unwrap().push_back(outcome);
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(
        &self,
        _system_prompt: &str,
        _turns: &[ConversationTurn],
    ) -> Result<CompletionOutcome> {
        Ok(self.script.lock().unwrap().pop_front().unwrap_or(CompletionOutcome::Reply {
            text: "Hi! I'm Tara. What's your name?".to_string(),
            extraction: Default::default(),
        }))
    }
}

/// Counting calendar mock; always succeeds.
#[derive(Default, Clone)]
pub struct CountingCalendar {
    calls: Arc<AtomicUsize>,
}

impl CountingCalendar {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CalendarGateway for CountingCalendar {
    async fn create_event(
        &self,
        _attendee_name: &str,
        _start: DateTime<Utc>,
        _title: &str,
    ) -> Result<EventId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(EventId("evt_test".to_string()))
    }
}

fn test_config() -> TaraConfig {
    TaraConfig {
        server: ServerConfig::default(),
        llm: LlmConfig {
            api_key: "gsk_test".into(),
            model: "llama-3.3-70b-versatile".into(),
            api_url: None,
            timeout_seconds: 5,
        },
        calendar: CalendarConfig {
            calendar_id: "primary".into(),
            client_id: "cid".into(),
            client_secret: "secret".into(),
            refresh_token: "rt".into(),
            timeout_seconds: 5,
        },
    }
}

/// Context wired over the mocks, exposing them for assertions.
pub struct TestContext {
    pub context: Arc<AppContext>,
    pub model: ScriptedModel,
    pub calendar: CountingCalendar,
    pub sessions: Arc<InMemorySessionStore>,
}

pub fn test_context() -> TestContext {
    let model = ScriptedModel::default();
    let calendar = CountingCalendar::default();
    let sessions = Arc::new(InMemorySessionStore::new());

    let dialogue = Arc::new(DialogueService::new(
        Arc::new(model.clone()),
        Arc::new(calendar.clone()),
        sessions.clone(),
    ));

    let context =
        Arc::new(AppContext::with_dialogue(test_config(), dialogue, sessions.clone()));
    TestContext { context, model, calendar, sessions }
}
