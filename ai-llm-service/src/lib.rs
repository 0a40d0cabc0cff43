//! OpenAI-compatible LLM client shared across the FAQ backend.
//!
//! Three logical profiles are configured from the environment:
//! - **router**: deterministic chat completions with tool/function definitions
//!   (category classification).
//! - **synthesis**: chat completions used to write the final answer.
//! - **embedding**: `/v1/embeddings` vectors for nearest-neighbor search.
//!
//! All requests are non-streaming. Errors are normalized into the unified
//! [`AiLlmError`] type; token usage is surfaced on every completion so callers
//! can account for a whole request.

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod services;

pub use chat::{ChatCompletion, ChatMessage, Generated, TokenUsage, ToolCall, ToolDefinition};
pub use config::llm_model_config::LlmModelConfig;
pub use config::settings::LlmSettings;
pub use error_handler::AiLlmError;
pub use health_service::{HealthService, HealthStatus};
pub use services::open_ai_service::OpenAiService;
