use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization;
use crate::decimal::{Money, Rate};
use crate::types::DealStructure;

/// hard payment-to-income ceiling for the reverse solve; distinct from
/// and always at or below the review ceiling used in forward verdicts
pub const REVERSE_DTI_CEILING: Decimal = dec!(0.5);

/// nominal lease buyout fee, 0.1% of the vehicle price, kept inside the
/// financed amount on new-vehicle deals
pub const BUYOUT_FEE_RATE: Decimal = dec!(0.001);

/// tenors the solver reports, one through five years
pub const SOLVER_TENORS_MONTHS: [u32; 5] = [12, 24, 36, 48, 60];

/// caller-supplied figures for the reverse solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityInputs {
    pub monthly_income: Money,
    pub monthly_obligations: Money,
    pub available_cash: Money,
    /// fixed government registration fee, always paid from cash
    pub registration_fee: Money,
    /// financing-risk fee as a share of the vehicle price
    pub financing_risk_fee_rate: Rate,
    pub annual_rate: Rate,
    pub min_down_payment_percent: Decimal,
    pub deal_structure: DealStructure,
}

/// solved maximum deal for one tenor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffordabilityResult {
    pub term_months: u32,
    pub max_vehicle_price: Money,
    pub down_payment_amount: Money,
    pub down_payment_percent: Decimal,
    pub monthly_payment: Money,
    pub meets_minimum_down_payment: bool,
}

impl AffordabilityResult {
    /// zero-price placeholder for a tenor the budget cannot carry
    fn infeasible(term_months: u32) -> Self {
        Self {
            term_months,
            max_vehicle_price: Money::ZERO,
            down_payment_amount: Money::ZERO,
            down_payment_percent: Decimal::ZERO,
            monthly_payment: Money::ZERO,
            meets_minimum_down_payment: false,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.max_vehicle_price.is_positive()
    }
}

/// solve the maximum affordable vehicle price for every tenor
pub fn solve(inputs: &AffordabilityInputs) -> Vec<AffordabilityResult> {
    SOLVER_TENORS_MONTHS
        .iter()
        .map(|&term| solve_tenor(inputs, term))
        .collect()
}

/// solve one tenor by inverting the annuity formula and backing the
/// price out of the down-payment/fee composition
pub fn solve_tenor(inputs: &AffordabilityInputs, term_months: u32) -> AffordabilityResult {
    let budget = Money::from_decimal(inputs.monthly_income.as_decimal() * REVERSE_DTI_CEILING);
    let max_payment = budget - inputs.monthly_obligations;
    if !max_payment.is_positive() {
        return AffordabilityResult::infeasible(term_months);
    }

    let max_principal =
        amortization::max_principal_for_payment(max_payment, inputs.annual_rate, term_months);

    let risk_rate = inputs.financing_risk_fee_rate.as_decimal();
    // price * divisor = max_principal + cash - registration fee, where the
    // divisor folds in how each structure settles the risk fee
    let divisor = match inputs.deal_structure {
        DealStructure::NewVehicle => Decimal::ONE + risk_rate - BUYOUT_FEE_RATE,
        DealStructure::UsedVehicle => Decimal::ONE + risk_rate,
    };

    let price = (max_principal + inputs.available_cash - inputs.registration_fee) / divisor;
    if !price.is_positive() {
        return AffordabilityResult::infeasible(term_months);
    }

    let down_payment = match inputs.deal_structure {
        // risk fee and registration fee come out of cash before the down payment
        DealStructure::NewVehicle => {
            inputs.available_cash - price * risk_rate - inputs.registration_fee
        }
        // risk fee is capitalized, only the registration fee leaves cash
        DealStructure::UsedVehicle => inputs.available_cash - inputs.registration_fee,
    };
    if down_payment.is_negative() {
        // cash cannot even cover the mandatory fees
        return AffordabilityResult::infeasible(term_months);
    }

    let financed = match inputs.deal_structure {
        DealStructure::NewVehicle => price - down_payment - price * BUYOUT_FEE_RATE,
        DealStructure::UsedVehicle => price - down_payment + price * risk_rate,
    };
    let monthly_payment = amortization::monthly_payment(financed, inputs.annual_rate, term_months);

    let down_payment_percent =
        (down_payment.as_decimal() / price.as_decimal() * dec!(100)).round_dp(2);

    AffordabilityResult {
        term_months,
        max_vehicle_price: price,
        down_payment_amount: down_payment,
        down_payment_percent,
        monthly_payment,
        meets_minimum_down_payment: down_payment_percent >= inputs.min_down_payment_percent,
    }
}

/// pick the tenor to put forward: the caller's preference when it
/// matches a solved tenor, else the shortest tenor meeting the minimum
/// down payment, else the longest tenor
pub fn recommend<'a>(
    results: &'a [AffordabilityResult],
    preferred_term_months: Option<u32>,
) -> Option<&'a AffordabilityResult> {
    if let Some(preferred) = preferred_term_months {
        if let Some(result) = results.iter().find(|r| r.term_months == preferred) {
            return Some(result);
        }
    }

    results
        .iter()
        .find(|r| r.is_feasible() && r.meets_minimum_down_payment)
        .or_else(|| results.last())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_vehicle_inputs() -> AffordabilityInputs {
        AffordabilityInputs {
            monthly_income: Money::from_major(10_000_000),
            monthly_obligations: Money::from_major(1_000_000),
            available_cash: Money::from_major(60_000_000),
            registration_fee: Money::from_major(500_000),
            financing_risk_fee_rate: Rate::from_percentage(dec!(2)),
            annual_rate: Rate::from_percentage(dec!(20)),
            min_down_payment_percent: dec!(20),
            deal_structure: DealStructure::NewVehicle,
        }
    }

    #[test]
    fn test_solver_covers_all_tenors() {
        let results = solve(&new_vehicle_inputs());
        let terms: Vec<u32> = results.iter().map(|r| r.term_months).collect();
        assert_eq!(terms, vec![12, 24, 36, 48, 60]);
    }

    #[test]
    fn test_price_grows_with_tenor() {
        let results = solve(&new_vehicle_inputs());
        for pair in results.windows(2) {
            assert!(pair[1].max_vehicle_price > pair[0].max_vehicle_price);
        }
    }

    #[test]
    fn test_exhausted_budget_yields_zero_results() {
        let inputs = AffordabilityInputs {
            monthly_obligations: Money::from_major(5_000_000),
            ..new_vehicle_inputs()
        };

        for result in solve(&inputs) {
            assert!(!result.is_feasible());
            assert_eq!(result.max_vehicle_price, Money::ZERO);
            assert_eq!(result.monthly_payment, Money::ZERO);
            assert!(!result.meets_minimum_down_payment);
        }
    }

    #[test]
    fn test_solver_is_right_inverse_of_the_forward_math() {
        // feeding the solved price back through the annuity should land
        // the payment at the 50% ceiling within half a percent point
        let inputs = new_vehicle_inputs();

        for result in solve(&inputs) {
            assert!(result.is_feasible());

            let financed = result.max_vehicle_price
                - result.down_payment_amount
                - result.max_vehicle_price * BUYOUT_FEE_RATE;
            let payment =
                amortization::monthly_payment(financed, inputs.annual_rate, result.term_months);

            let dti = (payment + inputs.monthly_obligations).as_decimal()
                / inputs.monthly_income.as_decimal()
                * dec!(100);
            assert!(dti > dec!(49.5), "dti {} too low", dti);
            assert!(dti < dec!(50.5), "dti {} too high", dti);
        }
    }

    #[test]
    fn test_used_vehicle_capitalizes_the_risk_fee() {
        let inputs = AffordabilityInputs {
            deal_structure: DealStructure::UsedVehicle,
            ..new_vehicle_inputs()
        };

        for result in solve(&inputs) {
            assert!(result.is_feasible());
            // down payment is cash less the registration fee only
            assert_eq!(
                result.down_payment_amount,
                inputs.available_cash - inputs.registration_fee
            );

            let financed = result.max_vehicle_price - result.down_payment_amount
                + result.max_vehicle_price * inputs.financing_risk_fee_rate.as_decimal();
            let payment =
                amortization::monthly_payment(financed, inputs.annual_rate, result.term_months);
            assert!((payment - result.monthly_payment).abs() < Money::from_major(1));
        }
    }

    #[test]
    fn test_zero_rate_tenor_is_linear() {
        let inputs = AffordabilityInputs {
            annual_rate: Rate::ZERO,
            financing_risk_fee_rate: Rate::ZERO,
            ..new_vehicle_inputs()
        };

        let result = solve_tenor(&inputs, 12);
        // 4M budget over 12 months amortizes exactly 48M
        let expected_price =
            (Money::from_major(48_000_000) + inputs.available_cash - inputs.registration_fee)
                / (Decimal::ONE - BUYOUT_FEE_RATE);
        assert_eq!(result.max_vehicle_price, expected_price);
    }

    #[test]
    fn test_cash_below_fees_is_infeasible() {
        let inputs = AffordabilityInputs {
            available_cash: Money::from_major(100_000),
            registration_fee: Money::from_major(500_000),
            ..new_vehicle_inputs()
        };

        let result = solve_tenor(&inputs, 60);
        assert!(!result.is_feasible());
    }

    #[test]
    fn test_recommend_prefers_caller_tenor() {
        let results = solve(&new_vehicle_inputs());
        let pick = recommend(&results, Some(36)).unwrap();
        assert_eq!(pick.term_months, 36);
    }

    #[test]
    fn test_recommend_shortest_tenor_meeting_minimum() {
        let results = solve(&new_vehicle_inputs());
        let pick = recommend(&results, None).unwrap();

        // down payment share shrinks as the price grows with tenor, so the
        // shortest feasible tenor is also the best-covered one
        assert_eq!(pick.term_months, 12);
        assert!(pick.meets_minimum_down_payment);
    }

    #[test]
    fn test_recommend_falls_back_to_longest_tenor() {
        let inputs = AffordabilityInputs {
            min_down_payment_percent: dec!(99),
            ..new_vehicle_inputs()
        };
        let results = solve(&inputs);
        let pick = recommend(&results, None).unwrap();
        assert_eq!(pick.term_months, 60);
        assert!(!pick.meets_minimum_down_payment);
    }
}
