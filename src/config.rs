use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};
use crate::types::Decision;

// fallback values used when the persisted rule set omits a key
pub const DEFAULT_MAX_DTI_APPROVE: Decimal = dec!(50);
pub const DEFAULT_MAX_DTI_REVIEW: Decimal = dec!(60);
pub const DEFAULT_MIN_DOWN_PAYMENT_PERCENT: Decimal = dec!(5);

pub const DEFAULT_UP_TO_30_RESULT: Decision = Decision::Approved;

pub const DEFAULT_31_60_THRESHOLD_NEAR_MONTHS: i32 = 6;
pub const DEFAULT_31_60_THRESHOLD_FAR_MONTHS: i32 = 12;
pub const DEFAULT_31_60_LT_NEAR_RESULT: Decision = Decision::Rejected;
pub const DEFAULT_31_60_NEAR_TO_FAR_RESULT: Decision = Decision::Review;
pub const DEFAULT_31_60_NEAR_TO_FAR_SURCHARGE: Decimal = dec!(5);
pub const DEFAULT_31_60_GT_FAR_RESULT: Decision = Decision::Approved;
pub const DEFAULT_31_60_GT_FAR_SURCHARGE: Decimal = dec!(5);

pub const DEFAULT_61_90_THRESHOLD_MONTHS: i32 = 12;
pub const DEFAULT_61_90_GT_RESULT: Decision = Decision::Review;
pub const DEFAULT_61_90_LTE_RESULT: Decision = Decision::Rejected;

pub const DEFAULT_90_PLUS_THRESHOLD_MONTHS: i32 = 24;
pub const DEFAULT_90_PLUS_GT_RESULT: Decision = Decision::Review;
pub const DEFAULT_90_PLUS_LTE_RESULT: Decision = Decision::Rejected;

/// externally persisted verdict rule set; every field is optional and
/// falls back to the named default when absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictRuleSet {
    pub max_dti_approve: Option<Decimal>,
    pub max_dti_review: Option<Decimal>,
    pub min_down_payment_percent: Option<Decimal>,

    pub overdue_up_to_30_result: Option<Decision>,

    pub overdue_31_60_threshold_near: Option<i32>,
    pub overdue_31_60_threshold_far: Option<i32>,
    pub overdue_31_60_lt_near_result: Option<Decision>,
    pub overdue_31_60_near_to_far_result: Option<Decision>,
    pub overdue_31_60_near_to_far_surcharge: Option<Decimal>,
    pub overdue_31_60_gt_far_result: Option<Decision>,
    pub overdue_31_60_gt_far_surcharge: Option<Decimal>,

    pub overdue_61_90_threshold: Option<i32>,
    pub overdue_61_90_gt_result: Option<Decision>,
    pub overdue_61_90_lte_result: Option<Decision>,

    pub overdue_90_plus_threshold: Option<i32>,
    pub overdue_90_plus_gt_result: Option<Decision>,
    pub overdue_90_plus_lte_result: Option<Decision>,
}

impl VerdictRuleSet {
    /// parse a rule set from the JSON form the backing store keeps
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidRuleSet {
            message: e.to_string(),
        })
    }

    pub fn max_dti_approve(&self) -> Decimal {
        self.max_dti_approve.unwrap_or(DEFAULT_MAX_DTI_APPROVE)
    }

    pub fn max_dti_review(&self) -> Decimal {
        self.max_dti_review.unwrap_or(DEFAULT_MAX_DTI_REVIEW)
    }

    pub fn min_down_payment_percent(&self) -> Decimal {
        self.min_down_payment_percent
            .unwrap_or(DEFAULT_MIN_DOWN_PAYMENT_PERCENT)
    }

    pub fn overdue_up_to_30_result(&self) -> Decision {
        self.overdue_up_to_30_result.unwrap_or(DEFAULT_UP_TO_30_RESULT)
    }

    pub fn overdue_31_60_threshold_near(&self) -> i32 {
        self.overdue_31_60_threshold_near
            .unwrap_or(DEFAULT_31_60_THRESHOLD_NEAR_MONTHS)
    }

    pub fn overdue_31_60_threshold_far(&self) -> i32 {
        self.overdue_31_60_threshold_far
            .unwrap_or(DEFAULT_31_60_THRESHOLD_FAR_MONTHS)
    }

    pub fn overdue_31_60_lt_near_result(&self) -> Decision {
        self.overdue_31_60_lt_near_result
            .unwrap_or(DEFAULT_31_60_LT_NEAR_RESULT)
    }

    pub fn overdue_31_60_near_to_far_result(&self) -> Decision {
        self.overdue_31_60_near_to_far_result
            .unwrap_or(DEFAULT_31_60_NEAR_TO_FAR_RESULT)
    }

    pub fn overdue_31_60_near_to_far_surcharge(&self) -> Decimal {
        self.overdue_31_60_near_to_far_surcharge
            .unwrap_or(DEFAULT_31_60_NEAR_TO_FAR_SURCHARGE)
    }

    pub fn overdue_31_60_gt_far_result(&self) -> Decision {
        self.overdue_31_60_gt_far_result
            .unwrap_or(DEFAULT_31_60_GT_FAR_RESULT)
    }

    pub fn overdue_31_60_gt_far_surcharge(&self) -> Decimal {
        self.overdue_31_60_gt_far_surcharge
            .unwrap_or(DEFAULT_31_60_GT_FAR_SURCHARGE)
    }

    pub fn overdue_61_90_threshold(&self) -> i32 {
        self.overdue_61_90_threshold
            .unwrap_or(DEFAULT_61_90_THRESHOLD_MONTHS)
    }

    pub fn overdue_61_90_gt_result(&self) -> Decision {
        self.overdue_61_90_gt_result.unwrap_or(DEFAULT_61_90_GT_RESULT)
    }

    pub fn overdue_61_90_lte_result(&self) -> Decision {
        self.overdue_61_90_lte_result
            .unwrap_or(DEFAULT_61_90_LTE_RESULT)
    }

    pub fn overdue_90_plus_threshold(&self) -> i32 {
        self.overdue_90_plus_threshold
            .unwrap_or(DEFAULT_90_PLUS_THRESHOLD_MONTHS)
    }

    pub fn overdue_90_plus_gt_result(&self) -> Decision {
        self.overdue_90_plus_gt_result
            .unwrap_or(DEFAULT_90_PLUS_GT_RESULT)
    }

    pub fn overdue_90_plus_lte_result(&self) -> Decision {
        self.overdue_90_plus_lte_result
            .unwrap_or(DEFAULT_90_PLUS_LTE_RESULT)
    }
}

/// minimum down payment constraint for one risk grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskGradeRule {
    /// grade label, matched case-insensitively
    pub category: String,
    pub min_down_payment_percent: Decimal,
    pub active: bool,
}

impl RiskGradeRule {
    pub fn new(category: impl Into<String>, min_down_payment_percent: Decimal) -> Self {
        Self {
            category: category.into(),
            min_down_payment_percent,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rule_set_uses_defaults() {
        let rules = VerdictRuleSet::default();

        assert_eq!(rules.max_dti_approve(), DEFAULT_MAX_DTI_APPROVE);
        assert_eq!(rules.max_dti_review(), DEFAULT_MAX_DTI_REVIEW);
        assert_eq!(rules.min_down_payment_percent(), DEFAULT_MIN_DOWN_PAYMENT_PERCENT);
        assert_eq!(rules.overdue_31_60_threshold_near(), 6);
        assert_eq!(rules.overdue_31_60_threshold_far(), 12);
        assert_eq!(rules.overdue_61_90_threshold(), 12);
        assert_eq!(rules.overdue_90_plus_threshold(), 24);
        assert_eq!(rules.overdue_31_60_lt_near_result(), Decision::Rejected);
        assert_eq!(rules.overdue_90_plus_gt_result(), Decision::Review);
    }

    #[test]
    fn test_from_json_with_missing_keys() {
        let rules = VerdictRuleSet::from_json(
            r#"{"max_dti_approve": "45", "overdue_61_90_gt_result": "rejected"}"#,
        )
        .unwrap();

        assert_eq!(rules.max_dti_approve(), dec!(45));
        assert_eq!(rules.overdue_61_90_gt_result(), Decision::Rejected);
        // untouched keys fall back
        assert_eq!(rules.max_dti_review(), DEFAULT_MAX_DTI_REVIEW);
        assert_eq!(rules.overdue_31_60_gt_far_surcharge(), dec!(5));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(VerdictRuleSet::from_json("{not json").is_err());
    }
}
