use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use rust_decimal::Decimal;

/// underwriting decision, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// deal passes without underwriter involvement
    Approved,
    /// deal needs a human underwriter to confirm
    Review,
    /// deal fails the automatic rules
    Rejected,
}

impl Decision {
    /// the worse (more severe) of two decisions
    pub fn worst(self, other: Decision) -> Decision {
        self.max(other)
    }

    /// severity rank: approved(0) < review(1) < rejected(2)
    pub fn severity(self) -> u8 {
        match self {
            Decision::Approved => 0,
            Decision::Review => 1,
            Decision::Rejected => 2,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Approved => "approved",
            Decision::Review => "review",
            Decision::Rejected => "rejected",
        };
        write!(f, "{}", label)
    }
}

/// overdue severity category from the credit bureau report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdueCategory {
    /// no overdue history reported
    None,
    UpTo30Days,
    Days31To60,
    Days61To90,
    Over90Days,
}

/// single overdue history entry for one obligor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueRecord {
    /// obligor label for organization deals (company, director, guarantor)
    pub party: Option<String>,
    pub category: OverdueCategory,
    /// absent date means recency is unknown
    pub last_overdue_date: Option<NaiveDate>,
}

impl OverdueRecord {
    pub fn new(category: OverdueCategory, last_overdue_date: Option<NaiveDate>) -> Self {
        Self {
            party: None,
            category,
            last_overdue_date,
        }
    }

    pub fn for_party(
        party: impl Into<String>,
        category: OverdueCategory,
        last_overdue_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            party: Some(party.into()),
            category,
            last_overdue_date,
        }
    }
}

/// deal structure, decides how the financing-risk fee is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStructure {
    /// risk fee paid up front from cash, nominal buyout fee in the principal
    NewVehicle,
    /// risk fee capitalized into the loan principal
    UsedVehicle,
}

/// financial terms of a proposed deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealTerms {
    pub purchase_price: Money,
    pub down_payment_percent: Decimal,
    pub term_months: u32,
    pub annual_rate: Rate,
}

impl DealTerms {
    /// build validated deal terms
    pub fn new(
        purchase_price: Money,
        down_payment_percent: Decimal,
        term_months: u32,
        annual_rate: Rate,
    ) -> Result<Self> {
        if down_payment_percent < Decimal::ZERO || down_payment_percent > Decimal::from(100) {
            return Err(EngineError::InvalidDownPaymentPercent {
                value: down_payment_percent,
            });
        }
        if term_months == 0 {
            return Err(EngineError::InvalidTerm { months: term_months });
        }
        if annual_rate.is_negative() {
            return Err(EngineError::InvalidInterestRate { rate: annual_rate });
        }
        Ok(Self {
            purchase_price,
            down_payment_percent,
            term_months,
            annual_rate,
        })
    }

    /// down payment amount derived from price and percent
    pub fn down_payment_amount(&self) -> Money {
        self.purchase_price.percentage(self.down_payment_percent)
    }

    /// financed principal: price less the down payment
    pub fn financed_principal(&self) -> Money {
        self.purchase_price - self.down_payment_amount()
    }
}
