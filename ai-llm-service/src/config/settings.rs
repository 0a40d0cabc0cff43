//! Profile configs loaded strictly from environment variables.
//!
//! Three roles are used by the FAQ pipeline:
//!
//! - **router**    → deterministic classification with tool definitions
//! - **synthesis** → final answer generation
//! - **embedding** → query/corpus embedding vectors
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`   = API key (mandatory)
//! - `OPENAI_ENDPOINT`  = API base URL (default: `https://api.openai.com`)
//! - `LLM_CHAT_MODEL`   = chat model for router and synthesis (default: `gpt-4o`)
//! - `EMBEDDING_MODEL`  = embedding model (default: `text-embedding-3-small`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (default: 60)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, env_opt, env_opt_u64, must_env, validate_http_endpoint},
};

/// The three profile configs the backend is bootstrapped with.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Classification profile: temperature 0.0 so routing stays deterministic.
    pub router: LlmModelConfig,
    /// Answer-synthesis profile.
    pub synthesis: LlmModelConfig,
    /// Embedding profile.
    pub embedding: LlmModelConfig,
}

impl LlmSettings {
    /// Builds all three profiles from the environment.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] when `OPENAI_API_KEY` is missing, the
    /// endpoint is not an HTTP(S) URL, or a numeric variable fails to parse.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let api_key = must_env("OPENAI_API_KEY")?;
        let endpoint = env_opt("OPENAI_ENDPOINT").unwrap_or_else(|| "https://api.openai.com".into());
        validate_http_endpoint("OPENAI_ENDPOINT", &endpoint)?;

        let chat_model = env_opt("LLM_CHAT_MODEL").unwrap_or_else(|| "gpt-4o".into());
        let embed_model =
            env_opt("EMBEDDING_MODEL").unwrap_or_else(|| "text-embedding-3-small".into());
        let max_tokens = env_opt_u64("LLM_MAX_TOKENS")?.map(|v| v as u32);
        let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(60));

        let router = LlmModelConfig {
            model: chat_model.clone(),
            endpoint: endpoint.clone(),
            api_key: Some(api_key.clone()),
            max_tokens,
            temperature: Some(0.0),
            top_p: None,
            timeout_secs,
        };

        let synthesis = LlmModelConfig {
            temperature: Some(0.5),
            ..router.clone()
        };

        let embedding = LlmModelConfig {
            model: embed_model,
            endpoint,
            api_key: Some(api_key),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs,
        };

        Ok(Self {
            router,
            synthesis,
            embedding,
        })
    }
}
