//! Typed error for the chat pipeline.
//!
//! Every variant is contained at the pipeline boundary: callers of
//! [`crate::answer_query`] only ever see a well-formed outcome, degraded to
//! the apology response when one of these surfaces.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Errors from the LLM service (routing or synthesis call).
    #[error("LLM error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Errors from the retrieval layer.
    #[error("retrieval error: {0}")]
    Retrieval(#[from] faq_retrieval::RetrievalError),

    /// The model invoked a function outside the advertised six.
    #[error("unknown routing function: {0}")]
    UnknownFunction(String),

    /// Tool-call arguments did not decode as `{ text: string }`.
    #[error("malformed tool arguments: {0}")]
    MalformedArguments(#[from] serde_json::Error),

    /// The router returned neither a tool call nor usable text.
    #[error("router returned neither a tool call nor text")]
    EmptyRouterResponse,
}
