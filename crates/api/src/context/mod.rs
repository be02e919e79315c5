//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use tara_core::DialogueService;
use tara_domain::{Result, TaraConfig};
use tara_infra::{GoogleCalendarClient, GroqClient, HttpClient, InMemorySessionStore};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds the wired dialogue service.
pub struct AppContext {
    pub config: TaraConfig,
    pub dialogue: Arc<DialogueService>,
    sessions: Arc<InMemorySessionStore>,
}

impl AppContext {
    /// Wire all adapters to the core ports.
    ///
    /// The language-model client keeps the shared retry policy (its calls
    /// are side-effect free); the calendar client is built with a single
    /// attempt so the event insert is never silently retried.
    pub fn new(config: TaraConfig) -> Result<Self> {
        let llm_http = HttpClient::builder()
            .timeout(Duration::from_secs(config.llm.timeout_seconds))
            .user_agent("tara-agent")
            .build()?;
        let mut groq =
            GroqClient::new(config.llm.api_key.clone(), config.llm.model.clone(), llm_http);
        if let Some(url) = &config.llm.api_url {
            groq = groq.with_api_url(url.clone());
        }

        let calendar_http = HttpClient::builder()
            .timeout(Duration::from_secs(config.calendar.timeout_seconds))
            .max_attempts(1)
            .user_agent("tara-agent")
            .build()?;
        let calendar = GoogleCalendarClient::new(&config.calendar, calendar_http);

        let sessions = Arc::new(InMemorySessionStore::new());

        let dialogue = DialogueService::new(Arc::new(groq), Arc::new(calendar), sessions.clone())
            .with_timeouts(
                Duration::from_secs(config.llm.timeout_seconds),
                Duration::from_secs(config.calendar.timeout_seconds),
            );

        Ok(Self { config, dialogue: Arc::new(dialogue), sessions })
    }

    /// Build a context around an already-wired dialogue service. Used by
    /// router tests to substitute mock ports.
    pub fn with_dialogue(
        config: TaraConfig,
        dialogue: Arc<DialogueService>,
        sessions: Arc<InMemorySessionStore>,
    ) -> Self {
        Self { config, dialogue, sessions }
    }

    /// Health probe. Must not touch conversation state; it only reports the
    /// size of the session map.
    pub fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new()
            .add_component(ComponentHealth::healthy("dialogue_service"))
            .add_component(ComponentHealth::healthy("session_store"));
        status.calculate_score();
        status.message = Some(format!("{} live sessions", self.sessions.len()));
        status
    }
}
