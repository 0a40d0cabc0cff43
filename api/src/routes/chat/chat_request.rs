use ai_llm_service::{ChatMessage, TokenUsage};
use serde::{Deserialize, Serialize};

/// Request payload for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural-language user question.
    pub query: String,
    /// Prior conversation turns, oldest first. Owned by the caller and
    /// passed through to the pipeline verbatim.
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

/// Response payload for POST /chat. Always well-formed: failure paths carry
/// an apology string with zeroed usage and time.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Final response text.
    pub response: String,
    /// Token usage accumulated over the request's LLM calls.
    pub token_usage: TokenUsageDto,
    /// End-to-end elapsed time in seconds.
    pub elapsed_time: f64,
}

/// Usage counters in the ingress contract's field names.
#[derive(Debug, Serialize)]
pub struct TokenUsageDto {
    pub prompt: u32,
    pub completion: u32,
    pub total: u32,
}

impl From<TokenUsage> for TokenUsageDto {
    fn from(u: TokenUsage) -> Self {
        Self {
            prompt: u.prompt_tokens,
            completion: u.completion_tokens,
            total: u.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_history_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"query":"안녕"}"#).unwrap();
        assert_eq!(req.query, "안녕");
        assert!(req.chat_history.is_empty());
    }

    #[test]
    fn usage_dto_maps_contract_field_names() {
        let dto: TokenUsageDto = TokenUsage {
            prompt_tokens: 7,
            completion_tokens: 3,
            total_tokens: 10,
        }
        .into();
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(v["prompt"], 7);
        assert_eq!(v["completion"], 3);
        assert_eq!(v["total"], 10);
    }
}
