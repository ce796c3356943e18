use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// scheduled payment in an amortization schedule
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// equal-installment amortization schedule
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate the full payment schedule
    pub fn generate(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Self> {
        if term_months == 0 {
            return Err(EngineError::InvalidTerm { months: term_months });
        }

        let monthly_rate = annual_rate.monthly_rate().as_decimal();
        let installment = monthly_payment(principal, annual_rate, term_months);

        let mut payments = Vec::with_capacity(term_months as usize);
        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;

        for i in 1..=term_months {
            let interest_portion = Money::from_decimal(balance.as_decimal() * monthly_rate);
            let principal_portion = installment - interest_portion;

            cumulative_interest += interest_portion;
            cumulative_principal += principal_portion;

            let ending_balance = (balance - principal_portion).max(Money::ZERO);

            payments.push(ScheduledPayment {
                payment_number: i,
                beginning_balance: balance,
                payment_amount: installment,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
                cumulative_principal,
            });

            balance = ending_balance;
        }

        // fold residual rounding into the last payment
        if let Some(last) = payments.last_mut() {
            if last.ending_balance > Money::ZERO && last.ending_balance < Money::from_major(1) {
                last.principal_portion += last.ending_balance;
                last.payment_amount += last.ending_balance;
                last.ending_balance = Money::ZERO;
            }
        }

        let total_interest = payments
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            principal,
            annual_rate,
            term_months,
            payments,
            total_interest,
            total_payment,
        })
    }

    /// get payment for specific period
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        if payment_number == 0 {
            return None;
        }
        self.payments.get((payment_number - 1) as usize)
    }

    /// get remaining balance after a payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.principal)
    }
}

/// equal-installment (annuity) monthly payment
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with the zero-rate
/// limit P / n; returns zero for a non-positive principal or zero term
pub fn monthly_payment(principal: Money, annual_rate: Rate, term_months: u32) -> Money {
    if term_months == 0 || !principal.is_positive() {
        return Money::ZERO;
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();

    if monthly_rate.is_zero() {
        return principal / Decimal::from(term_months);
    }

    let compound = compound_factor(monthly_rate, term_months);
    let numerator = principal.as_decimal() * monthly_rate * compound;
    let denominator = compound - Decimal::ONE;

    Money::from_decimal(numerator / denominator)
}

/// total interest paid over the life of the loan, from a month-by-month
/// simulation of the schedule
pub fn total_interest(principal: Money, annual_rate: Rate, term_months: u32) -> Money {
    let payment = monthly_payment(principal, annual_rate, term_months);
    if payment.is_zero() {
        return Money::ZERO;
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();
    let mut balance = principal;
    let mut total = Money::ZERO;

    for _ in 0..term_months {
        let interest = Money::from_decimal(balance.as_decimal() * monthly_rate);
        let principal_portion = payment - interest;
        total += interest;
        balance -= principal_portion;
    }

    total
}

/// maximum principal amortizable by a fixed payment over the term
///
/// inverse of the annuity formula: payment * ((1 + r)^n - 1) / (r * (1 + r)^n),
/// zero-rate limit payment * n
pub fn max_principal_for_payment(payment: Money, annual_rate: Rate, term_months: u32) -> Money {
    if term_months == 0 || !payment.is_positive() {
        return Money::ZERO;
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();

    if monthly_rate.is_zero() {
        return payment * Decimal::from(term_months);
    }

    let compound = compound_factor(monthly_rate, term_months);
    let factor = (compound - Decimal::ONE) / (monthly_rate * compound);

    Money::from_decimal(payment.as_decimal() * factor)
}

/// (1 + r)^n by repeated multiplication
fn compound_factor(monthly_rate: Decimal, term_months: u32) -> Decimal {
    let base = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..term_months {
        compound *= base;
    }
    compound
}
