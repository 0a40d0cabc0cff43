//! Decodes the routing model's response into a dispatch decision.

use ai_llm_service::ChatCompletion;
use faq_retrieval::FaqCategory;
use serde::Deserialize;
use tracing::warn;

use crate::error::ChatError;

/// Terminal routing actions for one query. Exactly one handler or the
/// direct-answer path executes; never both.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    /// Run the named category's retrieval handler with the extracted text.
    Dispatch {
        category: FaqCategory,
        text: String,
    },
    /// The router answered directly; no further pipeline stage runs.
    DirectAnswer(String),
}

/// Arguments schema shared by all six search functions.
#[derive(Debug, Deserialize)]
struct SearchArguments {
    text: String,
}

/// Turns a completed routing call into a [`RoutingDecision`].
///
/// If the model returned tool invocations, only the first is executed; any
/// extra invocations are discarded with a warning (a model returning several
/// at once is outside the routing contract, and last-wins behavior would be
/// nondeterministic from the caller's view).
///
/// # Errors
/// - [`ChatError::UnknownFunction`] for a function name outside the six.
/// - [`ChatError::MalformedArguments`] when arguments don't decode as
///   `{ "text": string }`.
/// - [`ChatError::EmptyRouterResponse`] when neither a tool call nor usable
///   text came back.
pub fn decode_routing(completion: ChatCompletion) -> Result<RoutingDecision, ChatError> {
    if let Some(first) = completion.tool_calls.first() {
        if completion.tool_calls.len() > 1 {
            warn!(
                discarded = completion.tool_calls.len() - 1,
                kept = %first.function.name,
                "router returned multiple tool invocations; keeping the first"
            );
        }

        let category = FaqCategory::from_search_function(&first.function.name)
            .ok_or_else(|| ChatError::UnknownFunction(first.function.name.clone()))?;

        let args: SearchArguments = serde_json::from_str(&first.function.arguments)?;

        return Ok(RoutingDecision::Dispatch {
            category,
            text: args.text,
        });
    }

    match completion.content {
        Some(text) if !text.trim().is_empty() => Ok(RoutingDecision::DirectAnswer(text)),
        _ => Err(ChatError::EmptyRouterResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::chat::{TokenUsage, ToolCall, ToolCallFunction};

    fn call(name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_1".into(),
            kind: "function".into(),
            function: ToolCallFunction {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    fn completion(content: Option<&str>, tool_calls: Vec<ToolCall>) -> ChatCompletion {
        ChatCompletion {
            content: content.map(str::to_string),
            tool_calls,
            usage: TokenUsage::default(),
        }
    }

    #[test]
    fn tool_call_dispatches_to_matching_category() {
        let c = completion(
            None,
            vec![call(
                "account_seller_management_search",
                r#"{"text":"회원가입은 어떻게 하나요?"}"#,
            )],
        );
        let decision = decode_routing(c).unwrap();
        assert_eq!(
            decision,
            RoutingDecision::Dispatch {
                category: FaqCategory::AccountSellerManagement,
                text: "회원가입은 어떻게 하나요?".into(),
            }
        );
    }

    #[test]
    fn plain_text_is_a_direct_answer() {
        let c = completion(Some("오늘 날씨는 알려드리기 어렵습니다."), vec![]);
        assert_eq!(
            decode_routing(c).unwrap(),
            RoutingDecision::DirectAnswer("오늘 날씨는 알려드리기 어렵습니다.".into())
        );
    }

    #[test]
    fn first_invocation_wins_over_later_ones() {
        let c = completion(
            None,
            vec![
                call("marketing_promotion_search", r#"{"text":"첫번째"}"#),
                call("general_inquiry_search", r#"{"text":"두번째"}"#),
            ],
        );
        assert_eq!(
            decode_routing(c).unwrap(),
            RoutingDecision::Dispatch {
                category: FaqCategory::MarketingPromotion,
                text: "첫번째".into(),
            }
        );
    }

    #[test]
    fn unknown_function_is_an_error() {
        let c = completion(None, vec![call("drop_tables", r#"{"text":"x"}"#)]);
        assert!(matches!(
            decode_routing(c),
            Err(ChatError::UnknownFunction(name)) if name == "drop_tables"
        ));
    }

    #[test]
    fn malformed_arguments_are_an_error() {
        let c = completion(None, vec![call("general_inquiry_search", "{not json")]);
        assert!(matches!(
            decode_routing(c),
            Err(ChatError::MalformedArguments(_))
        ));
    }

    #[test]
    fn empty_router_response_is_an_error() {
        assert!(matches!(
            decode_routing(completion(None, vec![])),
            Err(ChatError::EmptyRouterResponse)
        ));
        assert!(matches!(
            decode_routing(completion(Some("   "), vec![])),
            Err(ChatError::EmptyRouterResponse)
        ));
    }
}
