/// Groq API client implementing the `LanguageModel` port
use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tara_core::{CompletionOutcome, LanguageModel};
use tara_domain::{
    constants::BOOKING_TOOL_NAME, utils::time::parse_time_of_day, ConversationTurn,
    DraftExtraction, Result, Role, TaraError, ToolDirective,
};
use tracing::{debug, warn};

use crate::http::HttpClient;

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, FunctionDefinition, GroqError,
    JsonSchema, ReplyPayload, ResponseFormat, ToolDefinition,
};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Low temperature keeps field extraction consistent across turns.
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Groq chat-completions client.
pub struct GroqClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl GroqClient {
    /// Create a new client for the given model.
    pub fn new(api_key: String, model: String, http_client: HttpClient) -> Self {
        Self { http_client, api_key, model, api_url: GROQ_API_URL.to_string() }
    }

    /// Override the endpoint (self-hosted gateways, tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Run one completion over the grounded prompt and history.
    async fn call_api(
        &self,
        system_prompt: &str,
        turns: &[ConversationTurn],
    ) -> std::result::Result<CompletionOutcome, GroqError> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(ChatMessage { role: "system".to_string(), content: system_prompt.to_string() });
        messages.extend(turns.iter().map(|turn| ChatMessage {
            role: role_name(turn.role).to_string(),
            content: turn.content.clone(),
        }));

        let request_payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            tools: vec![booking_tool()],
            tool_choice: "auto".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            response_format: reply_format(),
        };

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_payload);

        let response = self.http_client.send(request_builder).await.map_err(|err| match err {
            TaraError::Timeout(msg) => GroqError::Timeout(msg),
            other => GroqError::Network(other.to_string()),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "received Groq API response");

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), response).await);
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GroqError::InvalidSchema(format!("failed to parse response: {e}")))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GroqError::InvalidSchema("response contained no choices".to_string()))?;

        // A tool call wins over any content: it is the model's structured
        // booking intent.
        if let Some(call) = choice.message.tool_calls.and_then(|calls| calls.into_iter().next()) {
            if call.function.name != BOOKING_TOOL_NAME {
                return Err(GroqError::InvalidSchema(format!(
                    "unexpected tool call '{}'",
                    call.function.name
                )));
            }
            let directive: ToolDirective =
                serde_json::from_str(&call.function.arguments).map_err(|e| {
                    GroqError::InvalidSchema(format!(
                        "failed to parse tool arguments: {e}. Arguments: {}",
                        call.function.arguments
                    ))
                })?;
            return Ok(CompletionOutcome::Directive(directive));
        }

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| GroqError::InvalidSchema("empty completion".to_string()))?;

        let payload: ReplyPayload = serde_json::from_str(&content).map_err(|e| {
            GroqError::InvalidSchema(format!("failed to parse reply payload: {e}. Content: {content}"))
        })?;

        Ok(CompletionOutcome::Reply {
            text: payload.reply,
            extraction: parse_extraction(payload.fields),
        })
    }
}

#[async_trait]
impl LanguageModel for GroqClient {
    async fn complete(
        &self,
        system_prompt: &str,
        turns: &[ConversationTurn],
    ) -> Result<CompletionOutcome> {
        self.call_api(system_prompt, turns).await.map_err(|err| match err {
            GroqError::Authentication(msg) => TaraError::Auth(msg),
            GroqError::Network(msg) => TaraError::Network(msg),
            GroqError::Timeout(msg) => TaraError::Timeout(msg),
            other => TaraError::LlmProvider(other.to_string()),
        })
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

/// Tool definition the model sees for the booking call.
fn booking_tool() -> ToolDefinition {
    ToolDefinition {
        tool_type: "function".to_string(),
        function: FunctionDefinition {
            name: BOOKING_TOOL_NAME.to_string(),
            description: "Creates the calendar event. Only call this after the user explicitly \
                          confirms all details."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The user's full name"
                    },
                    "datetime": {
                        "type": "string",
                        "description": "Meeting start in ISO 8601 UTC, e.g. 2026-02-23T14:00:00"
                    },
                    "title": {
                        "type": "string",
                        "description": "Meeting title; omit to use the default"
                    }
                },
                "required": ["name", "datetime"]
            }),
        },
    }
}

/// Schema every conversational reply is constrained to: the text to speak
/// plus the model's current field extraction.
fn reply_format() -> ResponseFormat {
    ResponseFormat {
        format_type: "json_schema".to_string(),
        json_schema: Some(JsonSchema {
            name: "scheduling_reply".to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "reply": { "type": "string" },
                    "fields": {
                        "type": "object",
                        "properties": {
                            "name": { "type": ["string", "null"] },
                            "date": { "type": ["string", "null"] },
                            "time": { "type": ["string", "null"] },
                            "title": { "type": ["string", "null"] }
                        },
                        "required": ["name", "date", "time", "title"],
                        "additionalProperties": false
                    }
                },
                "required": ["reply", "fields"],
                "additionalProperties": false
            }),
            strict: Some(true),
        }),
    }
}

/// Parse the raw extraction strings; a value the model mangled is dropped
/// rather than propagated.
fn parse_extraction(fields: super::types::ExtractionFields) -> DraftExtraction {
    let date = fields.date.as_deref().and_then(|raw| match raw.parse() {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(raw, "discarding unparseable extracted date");
            None
        }
    });
    let time = fields.time.as_deref().and_then(|raw| {
        let parsed = parse_time_of_day(raw);
        if parsed.is_none() {
            warn!(raw, "discarding unparseable extracted time");
        }
        parsed
    });

    DraftExtraction { attendee_name: fields.name, date, time, title: fields.title }
}

fn rate_limit_delay() -> u64 {
    // Default when no Retry-After header is present.
    60
}

async fn error_for_status(status: u16, response: reqwest::Response) -> GroqError {
    let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        401 | 403 => GroqError::Authentication(format!("invalid API key ({status})")),
        429 => GroqError::RateLimit(rate_limit_delay()),
        _ => GroqError::Api { status, message },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(api_url: String) -> GroqClient {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .max_attempts(1) // No retries in tests
            .build()
            .unwrap();

        GroqClient::new("gsk_test".to_string(), "llama-3.3-70b-versatile".to_string(), http_client)
            .with_api_url(api_url)
    }

    fn turns() -> Vec<ConversationTurn> {
        vec![ConversationTurn::user("My name is John Smith")]
    }

    #[tokio::test]
    async fn parses_reply_with_extraction() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("Authorization", "Bearer gsk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": r#"{"reply":"Thanks, John! What date works for you?","fields":{"name":"John Smith","date":null,"time":null,"title":null}}"#
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(format!("{}/openai/v1/chat/completions", mock_server.uri()));
        let outcome = client.complete("prompt", &turns()).await.unwrap();

        match outcome {
            CompletionOutcome::Reply { text, extraction } => {
                assert_eq!(text, "Thanks, John! What date works for you?");
                assert_eq!(extraction.attendee_name.as_deref(), Some("John Smith"));
                assert!(extraction.date.is_none());
            }
            CompletionOutcome::Directive(_) => panic!("expected a reply"),
        }
    }

    #[tokio::test]
    async fn parses_tool_call_into_directive() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc",
                            "type": "function",
                            "function": {
                                "name": "createCalendarEvent",
                                "arguments": "{\"name\":\"John Smith\",\"datetime\":\"2026-02-23T14:00:00\",\"title\":\"Project Kickoff\"}"
                            }
                        }]
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let outcome = client.complete("prompt", &turns()).await.unwrap();

        match outcome {
            CompletionOutcome::Directive(directive) => {
                assert_eq!(directive.name, "John Smith");
                assert_eq!(directive.datetime, "2026-02-23T14:00:00");
                assert_eq!(directive.title.as_deref(), Some("Project Kickoff"));
            }
            CompletionOutcome::Reply { .. } => panic!("expected a directive"),
        }
    }

    #[tokio::test]
    async fn unparseable_extracted_date_is_dropped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": r#"{"reply":"Noted.","fields":{"name":"Ada","date":"next monday","time":"14:00","title":null}}"#
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let outcome = client.complete("prompt", &turns()).await.unwrap();

        match outcome {
            CompletionOutcome::Reply { extraction, .. } => {
                assert!(extraction.date.is_none());
                assert_eq!(extraction.time, tara_domain::utils::time::parse_time_of_day("14:00"));
            }
            CompletionOutcome::Directive(_) => panic!("expected a reply"),
        }
    }

    #[tokio::test]
    async fn maps_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.complete("prompt", &turns()).await;

        assert!(matches!(result, Err(TaraError::Auth(_))));
    }

    #[tokio::test]
    async fn maps_rate_limit_to_provider_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.complete("prompt", &turns()).await;

        assert!(matches!(result, Err(TaraError::LlmProvider(_))));
    }

    #[tokio::test]
    async fn rejects_non_json_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "plain text, not the reply schema" } }]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.complete("prompt", &turns()).await;

        assert!(matches!(result, Err(TaraError::LlmProvider(_))));
    }
}
