//! GET /health — LLM endpoint reachability snapshot.

use std::sync::Arc;

use axum::{Json, extract::State};

use ai_llm_service::HealthStatus;

use crate::core::app_state::AppState;

/// Handler: GET /health. Resilient: probe failures are reported inside the
/// snapshot, never as a transport fault.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.health.check(&state.health_target).await)
}
