//! Scripted in-memory mock for the `LanguageModel` port.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tara_core::{CompletionOutcome, LanguageModel};
use tara_domain::utils::time::parse_time_of_day;
use tara_domain::{ConversationTurn, DraftExtraction, Result, TaraError, ToolDirective};

/// Returns pre-scripted outcomes in order; panics in the test if the
/// dialogue asks for more completions than were scripted.
#[derive(Default, Clone)]
pub struct ScriptedLanguageModel {
    script: Arc<Mutex<VecDeque<Result<CompletionOutcome>>>>,
    delay: Option<Duration>,
    prompts_seen: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a conversational reply with the given extraction.
    pub fn reply(self, text: &str, extraction: DraftExtraction) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(CompletionOutcome::Reply { text: text.to_string(), extraction }));
        self
    }

    /// Queue a booking directive.
    pub fn directive(self, directive: ToolDirective) -> Self {
        self.script.lock().unwrap().push_back(Ok(CompletionOutcome::Directive(directive)));
        self
    }

    /// Queue a provider failure.
    pub fn failure(self, error: TaraError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Delay every completion, for exercising the orchestrator's bound.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Outcomes still queued (untaken).
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }

    /// System prompts observed so far.
    pub fn prompts_seen(&self) -> Vec<String> {
        self.prompts_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn complete(
        &self,
        system_prompt: &str,
        _turns: &[ConversationTurn],
    ) -> Result<CompletionOutcome> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.prompts_seen.lock().unwrap().push(system_prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TaraError::Internal("mock script exhausted".into())))
    }
}

/// Extraction builder shorthand used by the dialogue tests.
pub fn extraction(
    name: Option<&str>,
    date: Option<&str>,
    time: Option<&str>,
    title: Option<&str>,
) -> DraftExtraction {
    DraftExtraction {
        attendee_name: name.map(str::to_owned),
        date: date.map(|d| d.parse().unwrap()),
        time: time.map(|t| parse_time_of_day(t).unwrap()),
        title: title.map(str::to_owned),
    }
}
