/// Configuration for one LLM profile invocation.
///
/// The same struct serves chat-completion and embedding profiles; fields that
/// do not apply to a given endpoint are simply left `None`.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"gpt-4o"`, `"text-embedding-3-small"`).
    pub model: String,

    /// API base endpoint (e.g., `"https://api.openai.com"`). Any
    /// OpenAI-compatible server works, including local gateways.
    pub endpoint: String,

    /// API key sent as a Bearer token. Required by hosted providers.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
