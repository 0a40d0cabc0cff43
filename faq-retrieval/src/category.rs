//! The closed six-way FAQ category enumeration.
//!
//! Each category owns exactly one vector collection. Collection names are
//! fixed ASCII slugs because the vector backend does not accept the Korean
//! labels; the mapping is total and injective over the six variants.

/// FAQ topic category. One vector partition exists per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaqCategory {
    AccountSellerManagement,
    ProductPlatformManagement,
    MarketingPromotion,
    OperationsLogisticsManagement,
    AnalyticsAiTools,
    GeneralInquiry,
}

impl FaqCategory {
    /// All six categories, in corpus order.
    pub const ALL: [FaqCategory; 6] = [
        FaqCategory::AccountSellerManagement,
        FaqCategory::ProductPlatformManagement,
        FaqCategory::MarketingPromotion,
        FaqCategory::OperationsLogisticsManagement,
        FaqCategory::AnalyticsAiTools,
        FaqCategory::GeneralInquiry,
    ];

    /// Stable ASCII collection name for this category's vector partition.
    pub fn collection_name(self) -> &'static str {
        match self {
            FaqCategory::AccountSellerManagement => "account_seller_management",
            FaqCategory::ProductPlatformManagement => "product_platform_management",
            FaqCategory::MarketingPromotion => "marketing_promotion",
            FaqCategory::OperationsLogisticsManagement => "operations_logistics_management",
            FaqCategory::AnalyticsAiTools => "analytics_ai_tools",
            FaqCategory::GeneralInquiry => "general_inquiry",
        }
    }

    /// Name of the search function advertised to the routing model.
    pub fn search_function_name(self) -> &'static str {
        match self {
            FaqCategory::AccountSellerManagement => "account_seller_management_search",
            FaqCategory::ProductPlatformManagement => "product_platform_management_search",
            FaqCategory::MarketingPromotion => "marketing_promotion_search",
            FaqCategory::OperationsLogisticsManagement => "operations_logistics_management_search",
            FaqCategory::AnalyticsAiTools => "analytics_ai_tools_search",
            FaqCategory::GeneralInquiry => "general_inquiry_search",
        }
    }

    /// Korean display label, as used in prompts and logs.
    pub fn display_label(self) -> &'static str {
        match self {
            FaqCategory::AccountSellerManagement => "계정/판매자 관리",
            FaqCategory::ProductPlatformManagement => "상품/플랫폼 관리",
            FaqCategory::MarketingPromotion => "마케팅/프로모션",
            FaqCategory::OperationsLogisticsManagement => "운영/물류 관리",
            FaqCategory::AnalyticsAiTools => "분석/AI 도구",
            FaqCategory::GeneralInquiry => "기타",
        }
    }

    /// Resolves a routing function name back to its category.
    pub fn from_search_function(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.search_function_name() == name)
    }

    /// Parses a corpus category label (e.g., `"1. 계정/판매자 관리"` or
    /// `"기타"`). The optional leading ordinal is ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let body = trimmed
            .split_once(". ")
            .filter(|(prefix, _)| prefix.chars().all(|c| c.is_ascii_digit()))
            .map_or(trimmed, |(_, rest)| rest.trim());

        Self::ALL.into_iter().find(|c| c.display_label() == body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn collection_names_are_ascii_and_injective() {
        let names: HashSet<&str> = FaqCategory::ALL
            .into_iter()
            .map(FaqCategory::collection_name)
            .collect();
        assert_eq!(names.len(), 6);
        for name in names {
            assert!(name.is_ascii());
        }
    }

    #[test]
    fn function_names_round_trip() {
        for cat in FaqCategory::ALL {
            assert_eq!(
                FaqCategory::from_search_function(cat.search_function_name()),
                Some(cat)
            );
        }
        assert_eq!(FaqCategory::from_search_function("unknown_search"), None);
    }

    #[test]
    fn corpus_labels_parse_with_and_without_ordinal() {
        assert_eq!(
            FaqCategory::from_label("1. 계정/판매자 관리"),
            Some(FaqCategory::AccountSellerManagement)
        );
        assert_eq!(
            FaqCategory::from_label("4. 운영/물류 관리"),
            Some(FaqCategory::OperationsLogisticsManagement)
        );
        assert_eq!(
            FaqCategory::from_label("마케팅/프로모션"),
            Some(FaqCategory::MarketingPromotion)
        );
        assert_eq!(FaqCategory::from_label("기타"), Some(FaqCategory::GeneralInquiry));
        assert_eq!(FaqCategory::from_label("없는 카테고리"), None);
    }
}
