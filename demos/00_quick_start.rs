/// quick start - amortization math on a single deal
use rust_decimal_macros::dec;
use underwriting_engine_rs::{AmortizationSchedule, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100M financed over 60 months at 30.5% annual
    let principal = Money::from_major(100_000_000);
    let rate = Rate::from_percentage(dec!(30.5));

    let schedule = AmortizationSchedule::generate(principal, rate, 60)?;

    println!("monthly payment:  {}", schedule.payments[0].payment_amount);
    println!("total interest:   {}", schedule.total_interest);
    println!("total paid:       {}", schedule.total_payment);
    println!(
        "balance after 12: {}",
        schedule.balance_after_payment(12)
    );

    Ok(())
}
