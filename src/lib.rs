pub mod affordability;
pub mod amortization;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod income;
pub mod risk_grade;
pub mod types;
pub mod verdict;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{EngineError, Result};
pub use config::{RiskGradeRule, VerdictRuleSet};
pub use income::{FinancialProfile, IncomeEntry};
pub use types::{DealStructure, DealTerms, Decision, OverdueCategory, OverdueRecord};
pub use amortization::{
    monthly_payment, total_interest, AmortizationSchedule, ScheduledPayment,
};
pub use verdict::{
    classify_overdue, classify_overdue_records, debt_to_income, evaluate, DtiAssessment,
    OverdueAssessment, Verdict,
};
pub use risk_grade::{validate as validate_risk_grade, RiskGradeCheck};
pub use affordability::{
    recommend as recommend_tenor, solve as solve_affordability, AffordabilityInputs,
    AffordabilityResult,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
