//! POST /reindex — rebuilds the six vector partitions from the corpus.
//!
//! Operator-facing route: unlike /chat, failures here surface as HTTP errors
//! so a broken build is visible to whoever triggered it.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use faq_retrieval::IndexStats;

use crate::core::app_state::AppState;

/// Handler: POST /reindex
pub async fn reindex(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IndexStats>, (StatusCode, String)> {
    let stats = state
        .deps
        .retriever
        .build_index(&state.deps.store)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    Ok(Json(stats))
}
