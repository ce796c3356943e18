use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::amortization;
use crate::config::VerdictRuleSet;
use crate::income::FinancialProfile;
use crate::types::{DealTerms, Decision, OverdueRecord};
use crate::verdict::{dti, overdue};

/// preliminary underwriting verdict, produced fresh on every evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub decision: Decision,
    /// human-readable justifications, dti first, then overdue records
    /// in input order
    pub reasons: Vec<String>,
    /// baseline minimum plus accumulated overdue surcharges
    pub recommended_down_payment_percent: Decimal,
    pub debt_to_income_ratio: Option<Decimal>,
}

/// evaluate a deal: annuity payment, dti band, overdue classification,
/// worst-of composition
///
/// when income is non-positive the dti band is skipped and the overdue
/// branch alone drives the decision; this is the documented degraded
/// path for incomplete applications, not an error
pub fn evaluate(
    profile: &FinancialProfile,
    terms: &DealTerms,
    overdue_records: &[OverdueRecord],
    rules: &VerdictRuleSet,
    time: &SafeTimeProvider,
) -> Verdict {
    let monthly_income = profile.monthly_income();
    let monthly_payment = amortization::monthly_payment(
        terms.financed_principal(),
        terms.annual_rate,
        terms.term_months,
    );

    let mut reasons = Vec::new();

    let ratio = dti::debt_to_income(monthly_payment, profile.monthly_obligations, monthly_income);
    let dti_decision = match ratio {
        Some(ratio) => {
            let assessment = dti::assess(ratio, rules);
            reasons.push(assessment.reason);
            assessment.decision
        }
        None => {
            reasons.push("DTI not computed - no income data".to_string());
            Decision::Approved
        }
    };

    let as_of = time.now().date_naive();
    let overdue_assessment = overdue::classify_all(overdue_records, rules, as_of);
    reasons.extend(overdue_assessment.reasons);

    let decision = dti_decision.worst(overdue_assessment.decision);

    let recommended = rules.min_down_payment_percent() + overdue_assessment.surcharge;
    if terms.down_payment_percent < recommended {
        reasons.push(format!(
            "Proposed down payment {}% is below the recommended {}%",
            terms.down_payment_percent.round_dp(1),
            recommended.round_dp(1)
        ));
    }

    Verdict {
        decision,
        reasons,
        recommended_down_payment_percent: recommended.round_dp(1),
        debt_to_income_ratio: ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::income::IncomeEntry;
    use crate::types::OverdueCategory;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        ))
    }

    fn profile(monthly_income: i64) -> FinancialProfile {
        FinancialProfile::new(
            vec![IncomeEntry::new(Money::from_major(monthly_income), dec!(1))],
            Money::ZERO,
        )
    }

    fn no_overdue() -> Vec<OverdueRecord> {
        vec![OverdueRecord::new(OverdueCategory::None, None)]
    }

    #[test]
    fn test_high_dti_deal_is_rejected() {
        // income 5M/mo against a 266.7M vehicle at 5% down, 60 months, 30.5%
        let terms = DealTerms::new(
            Money::from_major(266_700_000),
            dec!(5),
            60,
            Rate::from_percentage(dec!(30.5)),
        )
        .unwrap();

        let verdict = evaluate(
            &profile(5_000_000),
            &terms,
            &no_overdue(),
            &VerdictRuleSet::default(),
            &test_time(),
        );

        let payment = amortization::monthly_payment(
            terms.financed_principal(),
            terms.annual_rate,
            terms.term_months,
        );
        assert!(payment > Money::from_major(8_000_000));
        assert!(payment < Money::from_major(8_500_000));

        let ratio = verdict.debt_to_income_ratio.unwrap();
        assert!(ratio > dec!(150));
        assert!(ratio < dec!(175));
        assert_eq!(verdict.decision, Decision::Rejected);
        assert!(verdict.reasons[0].contains("rejected"));
    }

    #[test]
    fn test_larger_down_payment_moves_the_band() {
        let terms = DealTerms::new(
            Money::from_major(266_700_000),
            dec!(40),
            60,
            Rate::from_percentage(dec!(30.5)),
        )
        .unwrap();

        let verdict = evaluate(
            &profile(10_000_000),
            &terms,
            &no_overdue(),
            &VerdictRuleSet::default(),
            &test_time(),
        );

        let ratio = verdict.debt_to_income_ratio.unwrap();
        assert!(ratio > dec!(50));
        assert!(ratio <= dec!(60));
        assert_eq!(verdict.decision, Decision::Review);
    }

    #[test]
    fn test_final_decision_never_better_than_components() {
        // dti approves but overdue history rejects
        let terms = DealTerms::new(
            Money::from_major(50_000_000),
            dec!(40),
            60,
            Rate::from_percentage(dec!(20)),
        )
        .unwrap();
        let records = vec![OverdueRecord::new(
            OverdueCategory::Over90Days,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        )];

        let verdict = evaluate(
            &profile(20_000_000),
            &terms,
            &records,
            &VerdictRuleSet::default(),
            &test_time(),
        );

        assert!(verdict.debt_to_income_ratio.unwrap() < dec!(50));
        assert_eq!(verdict.decision, Decision::Rejected);
    }

    #[test]
    fn test_no_income_falls_back_to_overdue_branch() {
        let terms = DealTerms::new(
            Money::from_major(50_000_000),
            dec!(20),
            36,
            Rate::from_percentage(dec!(20)),
        )
        .unwrap();
        let records = vec![OverdueRecord::new(
            OverdueCategory::Days61To90,
            Some(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()),
        )];

        let verdict = evaluate(
            &FinancialProfile::new(vec![], Money::ZERO),
            &terms,
            &records,
            &VerdictRuleSet::default(),
            &test_time(),
        );

        assert_eq!(verdict.debt_to_income_ratio, None);
        // 29 months > 12 month threshold: review from the overdue branch alone
        assert_eq!(verdict.decision, Decision::Review);
        assert!(verdict.reasons[0].contains("DTI not computed"));
    }

    #[test]
    fn test_recommended_down_payment_accumulates_surcharges() {
        let terms = DealTerms::new(
            Money::from_major(50_000_000),
            dec!(5),
            36,
            Rate::from_percentage(dec!(20)),
        )
        .unwrap();
        // 13 months ago: lenient 31-60 branch with +5% surcharge
        let records = vec![OverdueRecord::new(
            OverdueCategory::Days31To60,
            Some(NaiveDate::from_ymd_opt(2023, 5, 10).unwrap()),
        )];

        let verdict = evaluate(
            &profile(20_000_000),
            &terms,
            &records,
            &VerdictRuleSet::default(),
            &test_time(),
        );

        // baseline 5 + surcharge 5
        assert_eq!(verdict.recommended_down_payment_percent, dec!(10));
        assert!(verdict
            .reasons
            .iter()
            .any(|r| r.contains("below the recommended 10%")));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let terms = DealTerms::new(
            Money::from_major(100_000_000),
            dec!(15),
            48,
            Rate::from_percentage(dec!(25)),
        )
        .unwrap();
        let records = vec![OverdueRecord::new(
            OverdueCategory::Days31To60,
            Some(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()),
        )];
        let rules = VerdictRuleSet::default();
        let p = profile(12_000_000);

        let a = evaluate(&p, &terms, &records, &rules, &test_time());
        let b = evaluate(&p, &terms, &records, &rules, &test_time());
        assert_eq!(a, b);
    }
}
