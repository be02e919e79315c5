//! In-memory mock for the `CalendarGateway` port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tara_core::CalendarGateway;
use tara_domain::{EventId, Result, TaraError};
use uuid::Uuid;

/// What the mock should do on the next create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarBehavior {
    Succeed,
    FailTransient,
    FailAuth,
    /// Sleep past any reasonable bound to exercise the timeout path.
    Hang,
}

/// One event the mock accepted.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub attendee_name: String,
    pub start: DateTime<Utc>,
    pub title: String,
}

/// Records every create call and returns deterministic outcomes.
#[derive(Clone)]
pub struct MockCalendarGateway {
    events: Arc<Mutex<Vec<CreatedEvent>>>,
    attempts: Arc<AtomicUsize>,
    behavior: Arc<Mutex<CalendarBehavior>>,
}

impl MockCalendarGateway {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            attempts: Arc::new(AtomicUsize::new(0)),
            behavior: Arc::new(Mutex::new(CalendarBehavior::Succeed)),
        }
    }

    /// Switch the outcome of subsequent create calls.
    pub fn set_behavior(&self, behavior: CalendarBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// Total create calls attempted, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Events actually created.
    pub fn created(&self) -> Vec<CreatedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for MockCalendarGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CalendarGateway for MockCalendarGateway {
    async fn create_event(
        &self,
        attendee_name: &str,
        start: DateTime<Utc>,
        title: &str,
    ) -> Result<EventId> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let behavior = *self.behavior.lock().unwrap();
        match behavior {
            CalendarBehavior::Hang => {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Err(TaraError::Internal("unreachable after hang".into()))
            }
            CalendarBehavior::FailTransient => {
                Err(TaraError::Network("calendar API returned 503".into()))
            }
            CalendarBehavior::FailAuth => {
                Err(TaraError::Auth("refresh token rejected".into()))
            }
            CalendarBehavior::Succeed => {
                self.events.lock().unwrap().push(CreatedEvent {
                    attendee_name: attendee_name.to_string(),
                    start,
                    title: title.to_string(),
                });
                Ok(EventId(Uuid::new_v4().to_string()))
            }
        }
    }
}
