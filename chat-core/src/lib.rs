//! FAQ chat pipeline with a single public entry point.
//!
//! Public API: [`answer_query`]. It asks the routing model to classify the
//! query against six category search functions, runs the selected category's
//! retrieval handler (k-NN search → ID-joined answer assembly), prompts the
//! synthesis model with the assembled context, and returns the final
//! response with accumulated token usage and elapsed time.
//!
//! Whole-request failures never escape: the worst outcome is a well-formed
//! apology response with zeroed usage and time.

mod error;
pub mod prompt;
mod router;
mod tools;

pub use error::ChatError;
pub use router::{RoutingDecision, decode_routing};
pub use tools::FAQ_TOOLS;

use std::sync::Arc;
use std::time::Instant;

use ai_llm_service::{ChatMessage, OpenAiService, TokenUsage};
use answer_store::{AnswerStore, assemble};
use faq_retrieval::{FaqRetriever, format_questions};
use tracing::{error, info};

use crate::prompt::{APOLOGY, ROUTER_SYSTEM, build_answer_prompt};

/// Shared, read-only handles the pipeline runs against. Built once at
/// process bootstrap; requests share them without locking.
pub struct ChatDeps {
    /// Deterministic routing profile (temperature 0.0, tools attached).
    pub router_llm: Arc<OpenAiService>,
    /// Answer-synthesis profile.
    pub synthesis_llm: Arc<OpenAiService>,
    /// Category-partitioned vector retriever.
    pub retriever: Arc<FaqRetriever>,
    /// Answer corpus.
    pub store: Arc<AnswerStore>,
}

/// Final result of one query, always well-formed.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Response text shown to the user.
    pub response: String,
    /// Token usage accumulated over the routing and synthesis calls.
    pub usage: TokenUsage,
    /// End-to-end elapsed time in seconds.
    pub elapsed_secs: f64,
}

impl ChatOutcome {
    /// The degraded outcome: user-safe apology, zero usage, zero time.
    pub fn degraded() -> Self {
        Self {
            response: APOLOGY.to_string(),
            usage: TokenUsage::default(),
            elapsed_secs: 0.0,
        }
    }
}

/// Answers one user query, with prior conversation turns passed through
/// verbatim to the routing call (never summarized or truncated here).
///
/// This function does not fail: any pipeline error is logged for operators
/// and mapped to [`ChatOutcome::degraded`].
pub async fn answer_query(deps: &ChatDeps, query: &str, history: &[ChatMessage]) -> ChatOutcome {
    let started = Instant::now();

    match run_pipeline(deps, query, history).await {
        Ok((response, usage)) => ChatOutcome {
            response,
            usage,
            elapsed_secs: started.elapsed().as_secs_f64(),
        },
        Err(e) => {
            error!(error = %e, query_len = query.len(), "chat pipeline failed; returning degraded response");
            ChatOutcome::degraded()
        }
    }
}

/// Stages run strictly in order: route → retrieve → assemble → synthesize.
async fn run_pipeline(
    deps: &ChatDeps,
    query: &str,
    history: &[ChatMessage],
) -> Result<(String, TokenUsage), ChatError> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(ROUTER_SYSTEM));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(query));

    let completion = deps.router_llm.chat(&messages, Some(&FAQ_TOOLS)).await?;
    let mut usage = completion.usage;

    match decode_routing(completion)? {
        RoutingDecision::DirectAnswer(text) => {
            info!("router answered directly, no category dispatch");
            Ok((text, usage))
        }
        RoutingDecision::Dispatch { category, text } => {
            info!(category = category.collection_name(), "dispatching category handler");

            let hits = deps
                .retriever
                .search(category, &text, deps.retriever.top_k())
                .await?;

            let questions = format_questions(&hits);
            let answers = assemble(hits.iter().map(|h| h.id.as_str()), &deps.store);

            let system = build_answer_prompt(&text, &questions, &answers);
            let generated = deps.synthesis_llm.generate(&text, Some(&system)).await?;
            usage.absorb(generated.usage);

            Ok((generated.text, usage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_outcome_is_apologetic_and_zeroed() {
        let out = ChatOutcome::degraded();
        assert!(!out.response.is_empty());
        assert_eq!(out.usage.total_tokens, 0);
        assert_eq!(out.usage.prompt_tokens, 0);
        assert_eq!(out.usage.completion_tokens, 0);
        assert_eq!(out.elapsed_secs, 0.0);
    }
}
