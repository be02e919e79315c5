//! Turn-step and conversation-end routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tara_core::grounding;
use tara_domain::{SpokenResponse, TurnRequest};
use tracing::error;

use crate::context::AppContext;

/// One conversation turn.
///
/// The grounding context is captured here, once per request, so every model
/// invocation downstream sees the same "now". The response is always text
/// to speak; dialogue-level failures are already spoken by the
/// orchestrator; only internal invariant breaches surface as 500s.
pub async fn post_turn(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<SpokenResponse>, (StatusCode, Json<Value>)> {
    let ctx = grounding::capture_context();

    context.dialogue.step(&request, ctx).await.map(Json).map_err(|err| {
        error!(
            conversation_id = %request.conversation_id,
            error = %err,
            label = err.label(),
            "turn step failed"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": err.label() })))
    })
}

/// Explicit end-of-conversation signal from the voice layer.
pub async fn end_conversation(
    State(context): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    context.dialogue.end(&id).await.map(|state| Json(json!({ "state": state }))).map_err(|err| {
        error!(conversation_id = %id, error = %err, "conversation end failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": err.label() })))
    })
}
