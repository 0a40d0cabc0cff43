//! POST /chat — routes the query through the FAQ pipeline.

use std::sync::Arc;

use axum::{Json, extract::State};

use chat_core::answer_query;

use crate::{
    core::app_state::AppState,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat
///
/// Never returns a transport-level fault: pipeline failures surface as a
/// well-formed apology body with zeroed usage and time.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"query":"회원가입은 어떻게 하나요?","chat_history":[]}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let outcome = answer_query(&state.deps, &body.query, &body.chat_history).await;

    Json(ChatResponse {
        response: outcome.response,
        token_usage: outcome.usage.into(),
        elapsed_time: outcome.elapsed_secs,
    })
}
