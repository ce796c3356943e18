/// reverse solve: maximum vehicle price per tenor
use rust_decimal_macros::dec;
use underwriting_engine_rs::{
    recommend_tenor, solve_affordability, AffordabilityInputs, DealStructure, Money, Rate,
};

fn main() {
    let inputs = AffordabilityInputs {
        monthly_income: Money::from_major(12_000_000),
        monthly_obligations: Money::from_major(1_500_000),
        available_cash: Money::from_major(70_000_000),
        registration_fee: Money::from_major(600_000),
        financing_risk_fee_rate: Rate::from_percentage(dec!(2)),
        annual_rate: Rate::from_percentage(dec!(24)),
        min_down_payment_percent: dec!(20),
        deal_structure: DealStructure::NewVehicle,
    };

    let results = solve_affordability(&inputs);

    println!("term | max price       | down payment    | dp%    | payment");
    for r in &results {
        println!(
            "{:>4} | {:>15} | {:>15} | {:>5}% | {}",
            r.term_months,
            r.max_vehicle_price.to_string(),
            r.down_payment_amount.to_string(),
            r.down_payment_percent,
            r.monthly_payment,
        );
    }

    if let Some(pick) = recommend_tenor(&results, None) {
        println!(
            "recommended tenor: {} months (meets minimum: {})",
            pick.term_months, pick.meets_minimum_down_payment
        );
    }
}
