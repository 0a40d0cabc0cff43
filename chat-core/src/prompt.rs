//! Prompt text: router instructions, synthesis template, degraded apology.

/// System instructions for the routing call.
///
/// Enumerates the six categories with their function names and obliges the
/// model to call the matching function; only queries outside all six are
/// answered directly, with guidance toward the supported topics.
pub const ROUTER_SYSTEM: &str = "\
너의 역할은 사용자의 질문을 분석하여 적절한 검색 함수를 호출하는 것입니다.

사용자 질문이 다음 6가지 카테고리 중 하나에 해당하는 경우 반드시 해당 함수를 호출해야 합니다:

1. 계정/판매자 관리 관련 질문 → account_seller_management_search 함수 호출
2. 상품/플랫폼 관리 관련 질문 → product_platform_management_search 함수 호출
3. 마케팅/프로모션 관련 질문 → marketing_promotion_search 함수 호출
4. 운영/물류 관리 관련 질문 → operations_logistics_management_search 함수 호출
5. 분석/AI 도구 관련 질문 → analytics_ai_tools_search 함수 호출
6. 기타 일반 문의 → general_inquiry_search 함수 호출

**중요**: 위 카테고리에 해당하는 질문이면 반드시 해당 함수를 호출해야 합니다.
함수를 호출하지 않고 직접 답변하지 마세요.

위 6가지 카테고리에 해당하지 않는 질문에만 함수 호출 없이 직접 답변하세요.
그 경우에는 해당 질문에는 답변이 어렵다는 점을 정중히 안내하고, 다음과 같은
질문 예시를 참고하도록 알려주세요:

- \"스마트스토어 회원가입은 어떻게 하나요?\"
- \"상품 등록 방법을 알려주세요\"
- \"마케팅 메시지는 어떻게 보내나요?\"
- \"배송 관리는 어떻게 하나요?\"
- \"정산은 언제 이루어지나요?\"
";

/// User-safe apology returned when the pipeline fails as a whole. The
/// underlying cause goes to the operator log, never to the end user.
pub const APOLOGY: &str =
    "죄송합니다. 요청을 처리하는 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// Builds the synthesis system prompt from the user question and the two
/// retrieval blocks. Question and answer examples carry matching `[ID: ...]`
/// tags; the template tells the model to pair them by ID.
pub fn build_answer_prompt(text: &str, retriever: &str, answer: &str) -> String {
    format!(
        "\
역할: 사용자의 질문에 맞는 답변을 해주는 전문가
역할설명: 너는 사용자의 질문에 맞는 답변을 해줘. 나는 너에게 3가지를 알려줄 거야.
    1. 사용자의 질문
    2. 과거 질문 예시들
    3. 과거 답변 예시들
해당 정보를 바탕으로 사용자의 질문에 맞는 답변을 해줘.
질문 예시들과 답변 예시들에는 ID값이 있어. ID값이 일치하는 것끼리 한 쌍의
질문과 답변이니 이 점을 참고해서 답변해줘.

사용자 질문:
{text}

질문 예시:
{retriever}

답변 예시:
{answer}

답변:
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prompt_embeds_all_three_blocks() {
        let prompt = build_answer_prompt(
            "회원가입은 어떻게 하나요?",
            "1. [ID: 1] 회원가입 절차",
            "[ID: 1] 판매자 센터에서 가입하세요.",
        );
        assert!(prompt.contains("사용자 질문:\n회원가입은 어떻게 하나요?"));
        assert!(prompt.contains("질문 예시:\n1. [ID: 1] 회원가입 절차"));
        assert!(prompt.contains("답변 예시:\n[ID: 1] 판매자 센터에서 가입하세요."));
    }

    #[test]
    fn router_system_names_all_six_functions() {
        for name in [
            "account_seller_management_search",
            "product_platform_management_search",
            "marketing_promotion_search",
            "operations_logistics_management_search",
            "analytics_ai_tools_search",
            "general_inquiry_search",
        ] {
            assert!(ROUTER_SYSTEM.contains(name), "missing {name}");
        }
    }
}
