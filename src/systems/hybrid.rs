//! Hybrid system (SAM).
//!
//! Each installment is the simple average of the SAC and PRICE installments
//! for the same month. Interest is charged on the hybrid's own running
//! balance and the remainder of the installment amortizes principal.
//!
//! Both sub-schedules are linear in the principal, so the hybrid balance is
//! the mean of their balances and its amortization is the mean of theirs.
//! Amortization is taken from that mean and interest is the rest of the
//! installment. This matches `balance * i` month by month without running
//! the `b' = b(1 + i) - installment` recurrence, which compounds rounding
//! by `(1 + i)` every month.

use crate::core::loan::{AmortizationError, LoanTerms};
use crate::core::rate::RateConverter;
use crate::core::schedule::{AmortizationSystem, Period, Schedule};
use crate::systems::{constant_amortization, constant_installment};
use log::debug;
use rust_decimal::Decimal;

/// Validate the inputs and build a hybrid schedule.
pub fn compute(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
) -> Result<Schedule, AmortizationError> {
    let terms = LoanTerms::new(principal, annual_rate, term_months)?;
    Ok(build(&terms))
}

/// Build the schedule for already-validated terms.
pub(crate) fn build(terms: &LoanTerms) -> Schedule {
    let sac = constant_amortization::build(terms);
    let price = constant_installment::build(terms);
    let monthly_rate = RateConverter::monthly_rate(terms.annual_rate());
    debug!("SAM schedule for {}: monthly rate {}", terms, monthly_rate);

    let two = Decimal::TWO;
    let term = terms.term_months();
    let mut balance = terms.principal();
    let mut periods = Vec::with_capacity(term as usize);
    for (sac_period, price_period) in sac.periods().iter().zip(price.periods()) {
        // Halve before adding: the sum can exceed Decimal::MAX.
        let payment = sac_period.installment / two + price_period.installment / two;
        let amortization = if sac_period.month == term {
            balance
        } else {
            sac_period.amortization / two + price_period.amortization / two
        };
        let period = Period::new(sac_period.month, balance, amortization, payment - amortization);
        balance = period.closing_balance;
        periods.push(period);
    }

    Schedule::from_periods(AmortizationSystem::Hybrid, periods)
}
