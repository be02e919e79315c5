//! Configuration structures
//!
//! Plain data only; loading lives in `tara-infra::config`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CALENDAR_TIMEOUT_SECS, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaraConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub calendar: CalendarConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Language-model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for tests and self-hosted gateways; the adapter supplies the
    /// production endpoint when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

/// Calendar provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub calendar_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default = "default_calendar_timeout")]
    pub timeout_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_llm_timeout() -> u64 {
    DEFAULT_LLM_TIMEOUT_SECS
}

fn default_calendar_timeout() -> u64 {
    DEFAULT_CALENDAR_TIMEOUT_SECS
}
