//! Compare SAC, PRICE and SAM for a typical home loan, then show how a bad
//! input is reported per system.
//!
//! Run with `cargo run --example compare_systems`.

use amortization_engine::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("━━━ Scenario 1: 30-year home loan ━━━\n");

    let comparison = ScheduleComparison::run(dec!(300_000), dec!(0.105), 360);
    println!("{}", comparison);

    for system in AmortizationSystem::ALL {
        if let Some(savings) = comparison.savings_vs(system, AmortizationSystem::ConstantInstallment) {
            println!("  {:<6} saves {:>14} vs PRICE", system, savings.round_dp(2));
        }
    }

    println!("\n━━━ Scenario 2: invalid term ━━━\n");

    let failed = ScheduleComparison::run(dec!(300_000), dec!(0.105), 0);
    println!("{}", failed);
}
