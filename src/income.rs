use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// lump income sum earned over a reporting period
///
/// mirrors the optional application fields: salary, primary activity,
/// secondary and other income for individuals, or revenue and owner
/// income for organizations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub amount: Money,
    pub period_months: Decimal,
}

impl IncomeEntry {
    pub fn new(amount: Money, period_months: Decimal) -> Self {
        Self {
            amount,
            period_months,
        }
    }

    /// monthly value of the entry; invalid entries contribute zero
    pub fn monthly(&self) -> Money {
        if self.amount.is_positive() && self.period_months > Decimal::ZERO {
            self.amount / self.period_months
        } else {
            Money::ZERO
        }
    }
}

/// income streams and existing obligations of one applicant,
/// immutable per evaluation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub income: Vec<IncomeEntry>,
    pub monthly_obligations: Money,
}

impl FinancialProfile {
    pub fn new(income: Vec<IncomeEntry>, monthly_obligations: Money) -> Self {
        Self {
            income,
            monthly_obligations,
        }
    }

    /// total monthly income over all valid entries; entries with a
    /// non-positive amount or period are skipped without error
    pub fn monthly_income(&self) -> Money {
        self.income
            .iter()
            .map(|e| e.monthly())
            .fold(Money::ZERO, |acc, x| acc + x)
    }
}
