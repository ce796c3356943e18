/// automatic underwriting verdict for a full application
use rust_decimal_macros::dec;
use underwriting_engine_rs::chrono::NaiveDate;
use underwriting_engine_rs::{
    evaluate, validate_risk_grade, DealTerms, FinancialProfile, IncomeEntry, Money, OverdueCategory,
    OverdueRecord, Rate, RiskGradeRule, SafeTimeProvider, TimeSource, VerdictRuleSet,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // salary plus a side activity, and one running loan
    let profile = FinancialProfile::new(
        vec![
            IncomeEntry::new(Money::from_major(96_000_000), dec!(12)),
            IncomeEntry::new(Money::from_major(9_000_000), dec!(6)),
        ],
        Money::from_major(1_200_000),
    );

    let terms = DealTerms::new(
        Money::from_major(180_000_000),
        dec!(25),
        48,
        Rate::from_percentage(dec!(28)),
    )?;

    // one moderate overdue, just over a year old
    let overdue = vec![OverdueRecord::new(
        OverdueCategory::Days31To60,
        NaiveDate::from_ymd_opt(2024, 5, 20),
    )];

    let rules = VerdictRuleSet::default();
    let time = SafeTimeProvider::new(TimeSource::System);

    let verdict = evaluate(&profile, &terms, &overdue, &rules, &time);

    println!("decision: {}", verdict.decision);
    if let Some(dti) = verdict.debt_to_income_ratio {
        println!("dti:      {}%", dti);
    }
    println!(
        "recommended down payment: {}%",
        verdict.recommended_down_payment_percent
    );
    for reason in &verdict.reasons {
        println!("  - {}", reason);
    }

    // risk-grade gate at submission time
    let risk_rules = vec![RiskGradeRule::new("B", dec!(20))];
    if let Some(check) = validate_risk_grade(Some("b"), false, terms.down_payment_percent, &risk_rules)
    {
        println!("risk grade check: {:?}", check);
    }

    Ok(())
}
