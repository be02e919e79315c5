//! HTTP routes

mod health;
mod turn;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;

/// Build the application router.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::get_health))
        .route("/v1/turn", post(turn::post_turn))
        .route("/v1/conversations/{id}/end", post(turn::end_conversation))
        .with_state(context)
}
