//! Public chat-completion types shared with callers.

use serde::{Deserialize, Serialize};

/// One message in a chat-completion conversation.
///
/// Conversation history arrives from outside the core (e.g., a web session)
/// and is passed through verbatim, so content is owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// One of: `"system"` | `"user"` | `"assistant"`.
    pub role: String,
    /// Plain text content.
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// A tool (function) definition advertised to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Always `"function"` for the OpenAI function-calling surface.
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionSpec,
}

impl ToolDefinition {
    /// Builds a function-type tool from name, description, and a JSON-schema
    /// parameter object.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            kind: "function".into(),
            function: FunctionSpec {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// The function half of a [`ToolDefinition`].
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    /// JSON-schema object describing the arguments.
    pub parameters: serde_json::Value,
}

/// A tool invocation returned by the model.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolCallFunction,
}

/// Function name + raw JSON arguments of a [`ToolCall`].
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    /// Arguments as the raw JSON string the model produced.
    pub arguments: String,
}

/// Token usage reported by the provider for one request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Adds another request's usage into this accumulator.
    pub fn absorb(&mut self, other: TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// Result of a tool-enabled chat completion.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    /// Assistant free-text content, when the model answered directly.
    pub content: Option<String>,
    /// Tool invocations, when the model chose to call a function.
    pub tool_calls: Vec<ToolCall>,
    /// Usage reported for this request.
    pub usage: TokenUsage,
}

/// Result of a plain (no tools) generation.
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub usage: TokenUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_absorb_accumulates() {
        let mut u = TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        };
        u.absorb(TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        });
        assert_eq!(u.prompt_tokens, 11);
        assert_eq!(u.completion_tokens, 7);
        assert_eq!(u.total_tokens, 18);
    }

    #[test]
    fn tool_definition_serializes_as_function() {
        let tool = ToolDefinition::function(
            "general_inquiry_search",
            "기타 문의 검색",
            serde_json::json!({"type": "object", "properties": {}}),
        );
        let v = serde_json::to_value(&tool).unwrap();
        assert_eq!(v["type"], "function");
        assert_eq!(v["function"]["name"], "general_inquiry_search");
    }
}
