use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::VerdictRuleSet;
use crate::types::{Decision, OverdueCategory, OverdueRecord};

/// outcome of classifying overdue history against the rule set
#[derive(Debug, Clone, PartialEq)]
pub struct OverdueAssessment {
    pub decision: Decision,
    /// additive recommended down payment surcharge, in percent points
    pub surcharge: Decimal,
    pub reasons: Vec<String>,
}

impl OverdueAssessment {
    fn clean() -> Self {
        Self {
            decision: Decision::Approved,
            surcharge: Decimal::ZERO,
            reasons: Vec::new(),
        }
    }
}

/// whole calendar months between a date and the evaluation date
pub fn months_since(date: NaiveDate, as_of: NaiveDate) -> i32 {
    (as_of.year() - date.year()) * 12 + (as_of.month() as i32 - date.month() as i32)
}

/// classify one overdue record
///
/// unknown recency (no last overdue date) takes the worst-case branch of
/// its category uniformly
pub fn classify(record: &OverdueRecord, rules: &VerdictRuleSet, as_of: NaiveDate) -> OverdueAssessment {
    let mut assessment = OverdueAssessment::clean();
    let prefix = match &record.party {
        Some(party) => format!("[{}] ", party),
        None => String::new(),
    };
    let recency = record.last_overdue_date.map(|d| months_since(d, as_of));

    match record.category {
        OverdueCategory::None => {}
        OverdueCategory::UpTo30Days => {
            let decision = rules.overdue_up_to_30_result();
            assessment.decision = decision;
            assessment
                .reasons
                .push(format!("{}Overdue up to 30 days - {}", prefix, decision));
        }
        OverdueCategory::Days31To60 => {
            let near = rules.overdue_31_60_threshold_near();
            let far = rules.overdue_31_60_threshold_far();
            match recency {
                None => {
                    let decision = rules.overdue_31_60_lt_near_result();
                    assessment.decision = decision;
                    assessment.reasons.push(format!(
                        "{}Overdue 31-60 days, recency unknown, treated as < {} mo - {}",
                        prefix, near, decision
                    ));
                }
                Some(m) if m < near => {
                    let decision = rules.overdue_31_60_lt_near_result();
                    assessment.decision = decision;
                    assessment.reasons.push(format!(
                        "{}Overdue 31-60 days, recency {} mo < {} mo - {}",
                        prefix, m, near, decision
                    ));
                }
                Some(m) if m <= far => {
                    let decision = rules.overdue_31_60_near_to_far_result();
                    let surcharge = rules.overdue_31_60_near_to_far_surcharge();
                    assessment.decision = decision;
                    assessment.surcharge += surcharge;
                    assessment.reasons.push(format!(
                        "{}Overdue 31-60 days, recency {} mo ({}-{} mo) - {}, down payment +{}%",
                        prefix, m, near, far, decision, surcharge
                    ));
                }
                Some(m) => {
                    let decision = rules.overdue_31_60_gt_far_result();
                    let surcharge = rules.overdue_31_60_gt_far_surcharge();
                    assessment.decision = decision;
                    assessment.surcharge += surcharge;
                    assessment.reasons.push(format!(
                        "{}Overdue 31-60 days, recency {} mo > {} mo - {}, down payment +{}%",
                        prefix, m, far, decision, surcharge
                    ));
                }
            }
        }
        OverdueCategory::Days61To90 => {
            let threshold = rules.overdue_61_90_threshold();
            match recency {
                Some(m) if m > threshold => {
                    let decision = rules.overdue_61_90_gt_result();
                    assessment.decision = decision;
                    assessment.reasons.push(format!(
                        "{}Overdue 61-90 days, recency {} mo > {} mo - {}",
                        prefix, m, threshold, decision
                    ));
                }
                _ => {
                    let decision = rules.overdue_61_90_lte_result();
                    assessment.decision = decision;
                    let shown = recency
                        .map(|m| format!("{} mo", m))
                        .unwrap_or_else(|| "unknown".to_string());
                    assessment.reasons.push(format!(
                        "{}Overdue 61-90 days, recency {} <= {} mo - {}",
                        prefix, shown, threshold, decision
                    ));
                }
            }
        }
        OverdueCategory::Over90Days => {
            let threshold = rules.overdue_90_plus_threshold();
            match recency {
                Some(m) if m > threshold => {
                    let decision = rules.overdue_90_plus_gt_result();
                    assessment.decision = decision;
                    assessment.reasons.push(format!(
                        "{}Overdue 90+ days, recency {} mo > {} mo - {}",
                        prefix, m, threshold, decision
                    ));
                }
                _ => {
                    let decision = rules.overdue_90_plus_lte_result();
                    assessment.decision = decision;
                    let shown = recency
                        .map(|m| format!("{} mo", m))
                        .unwrap_or_else(|| "unknown".to_string());
                    assessment.reasons.push(format!(
                        "{}Overdue 90+ days, recency {} <= {} mo - {}",
                        prefix, shown, threshold, decision
                    ));
                }
            }
        }
    }

    assessment
}

/// classify a set of overdue records (company, director, guarantor on
/// organization deals): worst sub-verdict wins, surcharges sum, reasons
/// keep the input order
pub fn classify_all(
    records: &[OverdueRecord],
    rules: &VerdictRuleSet,
    as_of: NaiveDate,
) -> OverdueAssessment {
    let mut combined = OverdueAssessment::clean();

    for record in records {
        let one = classify(record, rules, as_of);
        combined.decision = combined.decision.worst(one.decision);
        combined.surcharge += one.surcharge;
        combined.reasons.extend(one.reasons);
    }

    combined
}
