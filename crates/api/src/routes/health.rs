//! Health probe route

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// Liveness/readiness probe.
///
/// A no-op with respect to conversation state: it never creates, locks or
/// evicts a session.
pub async fn get_health(State(context): State<Arc<AppContext>>) -> Json<HealthStatus> {
    Json(context.health_check())
}
