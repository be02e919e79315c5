//! Conversation transcript types
//!
//! One conversation is an append-only sequence of turns. The voice platform
//! resends the full history on every request, so turns are plain data and
//! never mutated once appended.

use serde::{Deserialize, Serialize};

/// Speaker role for a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// Structured tool-call payload attached to an assistant turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallPayload {
    /// Name of the invoked function.
    pub function_name: String,
    /// Raw JSON arguments as emitted by the model.
    pub arguments: serde_json::Value,
}

/// One exchange unit of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    /// Present only on assistant turns that carried a tool call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCallPayload>,
}

impl ConversationTurn {
    /// Convenience constructor for a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), tool_call: None }
    }

    /// Convenience constructor for an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into(), tool_call: None }
    }
}

/// Inbound turn-step request from the voice platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    pub conversation_id: String,
    pub messages: Vec<ConversationTurn>,
}

impl TurnRequest {
    /// Latest user utterance in the transcript, if any.
    pub fn last_user_utterance(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.content.as_str())
    }

    /// History with platform-supplied system turns stripped.
    ///
    /// The grounded system prompt is injected per request; whatever system
    /// message the voice platform sends must not reach the model.
    pub fn history(&self) -> Vec<ConversationTurn> {
        self.messages.iter().filter(|turn| turn.role != Role::System).cloned().collect()
    }
}

/// The only outbound shape the voice layer ever sees: text to speak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenResponse {
    pub text: String,
}

impl SpokenResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_strips_system_turns() {
        let request = TurnRequest {
            conversation_id: "c-1".into(),
            messages: vec![
                ConversationTurn {
                    role: Role::System,
                    content: "platform prompt".into(),
                    tool_call: None,
                },
                ConversationTurn::user("hi"),
                ConversationTurn::assistant("hello"),
            ],
        };

        let history = request.history();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|t| t.role != Role::System));
    }

    #[test]
    fn last_user_utterance_skips_assistant_turns() {
        let request = TurnRequest {
            conversation_id: "c-1".into(),
            messages: vec![
                ConversationTurn::user("my name is Ada"),
                ConversationTurn::assistant("What date works for you?"),
            ],
        };

        assert_eq!(request.last_user_utterance(), Some("my name is Ada"));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
