//! Build one schedule per system and print it.
//!
//! Run with `cargo run --example basic_schedule`.

use amortization_engine::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  amortization-engine: Basic Schedule Example ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let principal = dec!(24_000);
    let annual_rate = dec!(0.18);
    let term = 12;

    println!(
        "Loan: {} at {}% a year over {} months\n",
        principal,
        annual_rate * dec!(100),
        term
    );

    for system in AmortizationSystem::ALL {
        match ScheduleEngine::compute(system, principal, annual_rate, term) {
            Ok(schedule) => println!("{}", schedule),
            Err(e) => eprintln!("Error in {} calculation: {}", system, e),
        }
    }

    let monthly = RateConverter::monthly_rate(annual_rate);
    println!("Equivalent monthly rate: {}%", (monthly * dec!(100)).round_dp(6));
}
