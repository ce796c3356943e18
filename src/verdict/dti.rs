use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::VerdictRuleSet;
use crate::decimal::Money;
use crate::types::Decision;

/// debt-to-income ratio as a percentage
///
/// (proposed installment + existing obligations) / monthly income * 100;
/// None when income is non-positive, the ratio is undefined rather than
/// zero or infinite
pub fn debt_to_income(
    monthly_payment: Money,
    monthly_obligations: Money,
    monthly_income: Money,
) -> Option<Decimal> {
    if !monthly_income.is_positive() {
        return None;
    }

    let total_debt = monthly_payment + monthly_obligations;
    Some((total_debt.as_decimal() / monthly_income.as_decimal() * dec!(100)).round_dp(2))
}

/// dti banding outcome against the rule set thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct DtiAssessment {
    pub decision: Decision,
    pub ratio: Decimal,
    pub reason: String,
}

/// classify a computed ratio against the approve/review ceilings
pub fn assess(ratio: Decimal, rules: &VerdictRuleSet) -> DtiAssessment {
    let max_approve = rules.max_dti_approve();
    let max_review = rules.max_dti_review();
    let shown = ratio.round_dp(1);

    if ratio <= max_approve {
        DtiAssessment {
            decision: Decision::Approved,
            ratio,
            reason: format!("DTI {}% <= {}% - approved", shown, max_approve),
        }
    } else if ratio <= max_review {
        DtiAssessment {
            decision: Decision::Review,
            ratio,
            reason: format!(
                "DTI {}% > {}%, <= {}% - review",
                shown, max_approve, max_review
            ),
        }
    } else {
        DtiAssessment {
            decision: Decision::Rejected,
            ratio,
            reason: format!("DTI {}% > {}% - rejected", shown, max_review),
        }
    }
}
