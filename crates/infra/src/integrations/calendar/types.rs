/// Google Calendar API types
use serde::{Deserialize, Serialize};

/// Calendar API error types
#[derive(Debug, thiserror::Error)]
pub enum CalendarApiError {
    /// Credentials rejected (refresh token or access token invalid)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Provider returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level error (connection failed, DNS, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body doesn't match expected schema
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),

    /// Request exceeded its bound
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Access token obtained from a refresh-token exchange.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// Event insert request body.
#[derive(Debug, Serialize)]
pub(crate) struct EventRequest {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
}

#[derive(Debug, Serialize)]
pub(crate) struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Event insert response (only the id is needed).
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedEventResponse {
    pub id: String,
}
