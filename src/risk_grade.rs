use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::RiskGradeRule;

/// outcome of checking a down payment against the risk-grade rule table
///
/// None from [`validate`] means "no constraint": an empty grade, a scoring
/// override, or an unmatched label never blocks a decision; whether a
/// violation blocks submission or is merely advisory is the caller's call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RiskGradeCheck {
    /// proposed down payment is below the grade minimum
    Violation {
        grade: String,
        minimum_required: Decimal,
        proposed: Decimal,
    },
    /// informational pass, records the minimum that was satisfied
    Satisfied {
        grade: String,
        minimum_required: Decimal,
        proposed: Decimal,
    },
}

/// check a proposed down payment percent against the minimum for the
/// applicant's risk grade; lookup is case-insensitive and skips
/// inactive rules
pub fn validate(
    risk_grade: Option<&str>,
    no_scoring_response: bool,
    proposed_down_payment_percent: Decimal,
    rules: &[RiskGradeRule],
) -> Option<RiskGradeCheck> {
    let grade = risk_grade.map(str::trim).filter(|g| !g.is_empty())?;
    if no_scoring_response {
        return None;
    }

    let rule = rules
        .iter()
        .find(|r| r.active && r.category.eq_ignore_ascii_case(grade))?;

    if proposed_down_payment_percent < rule.min_down_payment_percent {
        Some(RiskGradeCheck::Violation {
            grade: grade.to_string(),
            minimum_required: rule.min_down_payment_percent,
            proposed: proposed_down_payment_percent,
        })
    } else {
        Some(RiskGradeCheck::Satisfied {
            grade: grade.to_string(),
            minimum_required: rule.min_down_payment_percent,
            proposed: proposed_down_payment_percent,
        })
    }
}
