/// Google Calendar client implementing the `CalendarGateway` port
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Method;
use tara_core::CalendarGateway;
use tara_domain::{constants::EVENT_DURATION_SECS, CalendarConfig, EventId, Result, TaraError};
use tracing::{debug, info};

use crate::http::HttpClient;

use super::types::{
    CalendarApiError, CreatedEventResponse, EventRequest, EventTime, TokenResponse,
};

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google Calendar client.
///
/// Exchanges the long-lived refresh token for an access token on every
/// booking, then inserts a fixed one-hour event. The event insert is
/// idempotency-unaware on the provider side, so the HTTP client used here
/// must be built with `max_attempts(1)`: a flaky 5xx must surface to the
/// orchestrator instead of being silently retried into a duplicate.
pub struct GoogleCalendarClient {
    http_client: HttpClient,
    calendar_id: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    api_base: String,
    token_url: String,
}

impl GoogleCalendarClient {
    /// Create a new client from calendar configuration.
    pub fn new(config: &CalendarConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            calendar_id: config.calendar_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
            api_base: GOOGLE_CALENDAR_API_BASE.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }

    /// Override both endpoints (for testing against a mock server).
    #[cfg(test)]
    pub fn with_endpoints(mut self, api_base: impl Into<String>, token_url: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self.token_url = token_url.into();
        self
    }

    /// Exchange the refresh token for a short-lived access token.
    async fn fetch_access_token(&self) -> std::result::Result<String, CalendarApiError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let builder = self.http_client.request(Method::POST, &self.token_url).form(&params);
        let response = self.http_client.send(builder).await.map_err(map_transport)?;

        let status = response.status();
        debug!(status = status.as_u16(), "received token refresh response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            // Any rejection of the refresh grant means the credentials are
            // dead; there is no transient form of this failure.
            return Err(CalendarApiError::Authentication(format!(
                "token refresh rejected ({status}): {message}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CalendarApiError::InvalidSchema(format!("token response: {e}")))?;
        Ok(token.access_token)
    }

    async fn insert_event(
        &self,
        access_token: &str,
        body: &EventRequest,
    ) -> std::result::Result<String, CalendarApiError> {
        let url = format!("{}/calendars/{}/events", self.api_base, self.calendar_id);

        let builder = self
            .http_client
            .request(Method::POST, &url)
            .bearer_auth(access_token)
            .json(body);
        let response = self.http_client.send(builder).await.map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => CalendarApiError::Authentication(format!(
                    "event insert rejected ({status}): {message}"
                )),
                code => CalendarApiError::Api { status: code, message },
            });
        }

        let created: CreatedEventResponse = response
            .json()
            .await
            .map_err(|e| CalendarApiError::InvalidSchema(format!("event response: {e}")))?;
        Ok(created.id)
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendarClient {
    async fn create_event(
        &self,
        attendee_name: &str,
        start: DateTime<Utc>,
        title: &str,
    ) -> Result<EventId> {
        let end = start + ChronoDuration::seconds(EVENT_DURATION_SECS);

        let body = EventRequest {
            summary: title.to_string(),
            description: format!("Scheduled via Tara for {attendee_name}"),
            start: EventTime {
                date_time: start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                time_zone: "UTC".to_string(),
            },
            end: EventTime {
                date_time: end.format("%Y-%m-%dT%H:%M:%S").to_string(),
                time_zone: "UTC".to_string(),
            },
        };

        let result = async {
            let access_token = self.fetch_access_token().await?;
            self.insert_event(&access_token, &body).await
        }
        .await;

        match result {
            Ok(id) => {
                info!(event_id = %id, "calendar event created");
                Ok(EventId(id))
            }
            Err(err) => Err(map_api_error(err)),
        }
    }
}

fn map_transport(err: TaraError) -> CalendarApiError {
    match err {
        TaraError::Timeout(msg) => CalendarApiError::Timeout(msg),
        other => CalendarApiError::Network(other.to_string()),
    }
}

fn map_api_error(err: CalendarApiError) -> TaraError {
    match err {
        CalendarApiError::Authentication(msg) => TaraError::Auth(msg),
        CalendarApiError::Timeout(msg) => TaraError::Timeout(msg),
        CalendarApiError::Api { status, message } => {
            TaraError::Network(format!("calendar API error ({status}): {message}"))
        }
        CalendarApiError::Network(msg) | CalendarApiError::InvalidSchema(msg) => {
            TaraError::Network(msg)
        }
    }
}
