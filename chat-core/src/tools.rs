//! Tool definitions advertised to the routing model: one search function per
//! category, each taking a single `text` argument.

use std::sync::LazyLock;

use ai_llm_service::ToolDefinition;
use faq_retrieval::FaqCategory;
use serde_json::json;

/// The six category search functions, in corpus order.
pub static FAQ_TOOLS: LazyLock<Vec<ToolDefinition>> = LazyLock::new(|| {
    FaqCategory::ALL
        .into_iter()
        .map(|category| {
            ToolDefinition::function(
                category.search_function_name(),
                format!(
                    "{} 관련 질문에 대해 유사한 FAQ 질문과 답변을 검색합니다.",
                    category.display_label()
                ),
                json!({
                    "type": "object",
                    "properties": {
                        "text": {
                            "type": "string",
                            "description": "검색에 사용할 사용자 질문 텍스트"
                        }
                    },
                    "required": ["text"]
                }),
            )
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tool_per_category_with_text_parameter() {
        assert_eq!(FAQ_TOOLS.len(), 6);
        for tool in FAQ_TOOLS.iter() {
            assert_eq!(tool.kind, "function");
            assert!(FaqCategory::from_search_function(&tool.function.name).is_some());
            assert_eq!(tool.function.parameters["required"][0], "text");
        }
    }
}
