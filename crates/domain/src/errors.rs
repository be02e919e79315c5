//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tara
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TaraError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream timeout: {0}")]
    Timeout(String),

    #[error("Duplicate booking attempt: {0}")]
    DuplicateBooking(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Language model error: {0}")]
    LlmProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaraError {
    /// Stable label for metrics and structured logging.
    ///
    /// Never derived from the message payload, so log cardinality stays
    /// bounded and no user content leaks into labels.
    pub fn label(&self) -> &'static str {
        match self {
            TaraError::Validation(_) => "validation",
            TaraError::Timeout(_) => "timeout",
            TaraError::DuplicateBooking(_) => "duplicate_booking",
            TaraError::Auth(_) => "auth",
            TaraError::Network(_) => "network",
            TaraError::LlmProvider(_) => "llm_provider",
            TaraError::Config(_) => "config",
            TaraError::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Tara operations
pub type Result<T> = std::result::Result<T, TaraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(TaraError::Validation("x".into()).label(), "validation");
        assert_eq!(TaraError::DuplicateBooking("x".into()).label(), "duplicate_booking");
        assert_eq!(TaraError::Auth("x".into()).label(), "auth");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = TaraError::Timeout("calendar call exceeded 10s".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Timeout");
        assert_eq!(json["message"], "calendar call exceeded 10s");
    }
}
