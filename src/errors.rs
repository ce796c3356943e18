use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Rate;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid down payment percent: {value} (expected 0-100)")]
    InvalidDownPaymentPercent {
        value: Decimal,
    },

    #[error("invalid term: {months} months (expected at least 1)")]
    InvalidTerm {
        months: u32,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid rule set: {message}")]
    InvalidRuleSet {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
