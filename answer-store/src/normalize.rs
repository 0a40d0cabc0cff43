//! Boilerplate stripping for stored answer text.
//!
//! Corpus answers were scraped with their help-center chrome attached:
//! star-rating prompts, "was this helpful" banners, feedback-form buttons.
//! [`clean`] removes that chrome with an ordered rule list — whole-text
//! patterns first, then a per-line denylist — and is idempotent, so cleaning
//! already-clean text is a no-op.

use std::sync::LazyLock;

use regex::Regex;

/// Whole-text rules, applied in order before line filtering.
///
/// Gaps inside a phrase are horizontal whitespace only; a phrase never spans
/// a line break, so dropping a line between two fragments cannot create a
/// new match on a second pass.
static TEXT_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Helpfulness banner and the rating UI trailing it.
        r"(?s)위 도움말이 도움이 되었나요\?.*\z",
        // Promotional tails to end of line.
        r"(?m)(?:도움이[ \t]*되었다면|평가해[ \t]*주세요|만족도[ \t]*평가).*$",
        // Inline star-rating mentions.
        r"별점[ \t]*\d+[ \t]*점",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("static cleaning pattern"))
    .collect()
});

/// A line containing any of these substrings is dropped entirely.
const LINE_DENYLIST: &[&str] = &[
    "별점",
    "★",
    "⭐",
    "위 도움말이 도움이 되었나요",
    "평가",
    "만족도",
    "소중한 의견을 남겨주시면",
    "보완하도록 노력하겠습니다",
    "보내기",
    "도움말 닫기",
];

/// Strips rating/feedback boilerplate from a raw answer.
///
/// Pure function. If every line is filtered out the result is the empty
/// string; callers treat that as a valid (blank) cleaned answer, not an
/// error.
pub fn clean(raw: &str) -> String {
    let mut text = raw.to_string();
    for rule in TEXT_RULES.iter() {
        text = rule.replace_all(&text, "").into_owned();
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !LINE_DENYLIST.iter().any(|p| line.contains(p)))
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_substantive_text() {
        let raw = "판매자 센터에 로그인한 후\n가입 신청 메뉴를 이용하세요.";
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn drops_denylisted_lines_completely() {
        let raw = "정산은 영업일 기준 1일 이내 완료됩니다.\n별점5점 주세요\n감사합니다.";
        let out = clean(raw);
        assert!(!out.contains("별점"));
        assert!(out.contains("정산은 영업일 기준 1일 이내 완료됩니다."));
        assert!(out.contains("감사합니다."));
    }

    #[test]
    fn removes_helpfulness_banner_and_everything_after() {
        let raw = "배송 설정은 배송 관리 메뉴에서 변경합니다.\n\n위 도움말이 도움이 되었나요?\n별점1점\n별점5점\n소중한 의견을 남겨주시면 보완하도록 노력하겠습니다.\n보내기\n도움말 닫기";
        assert_eq!(clean(raw), "배송 설정은 배송 관리 메뉴에서 변경합니다.");
    }

    #[test]
    fn drops_star_and_emoji_lines() {
        let raw = "첫 줄\n★★★★★\n⭐⭐⭐\n둘째 줄";
        assert_eq!(clean(raw), "첫 줄\n둘째 줄");
    }

    #[test]
    fn collapses_blank_lines_and_trims() {
        let raw = "  첫 줄  \n\n\n둘째 줄\n\n";
        assert_eq!(clean(raw), "첫 줄\n둘째 줄");
    }

    #[test]
    fn idempotent_on_arbitrary_inputs() {
        let samples = [
            "",
            "평범한 답변입니다.",
            "답변\n별점 5 점\n평가해 주세요\n본문",
            "도움이 되었다면 별점을 남겨주세요\n안내 끝",
            "  공백  \n\n줄  ",
            // Dropping the middle line juxtaposes two phrase fragments.
            "도움이\n보내기\n되었다면 감사합니다",
        ];
        for s in samples {
            let once = clean(s);
            assert_eq!(clean(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn all_boilerplate_input_yields_empty_string() {
        let raw = "별점5점\n보내기\n도움말 닫기";
        assert_eq!(clean(raw), "");
    }
}
