pub mod dti;
pub mod engine;
pub mod overdue;

pub use dti::{assess as assess_dti, debt_to_income, DtiAssessment};
pub use engine::{evaluate, Verdict};
pub use overdue::{classify as classify_overdue, classify_all as classify_overdue_records, months_since, OverdueAssessment};
