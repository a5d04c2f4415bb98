//! Constant-amortization system (SAC).
//!
//! The principal is repaid in equal parts; interest is charged on the
//! outstanding balance, so installments fall month over month.

use crate::core::loan::{AmortizationError, LoanTerms};
use crate::core::rate::RateConverter;
use crate::core::schedule::{AmortizationSystem, Period, Schedule};
use log::debug;
use rust_decimal::Decimal;

/// Validate the inputs and build a constant-amortization schedule.
///
/// # Examples
///
/// ```
/// use amortization_engine::systems::constant_amortization;
/// use rust_decimal_macros::dec;
///
/// let schedule = constant_amortization::compute(dec!(1200), dec!(0), 12).unwrap();
/// assert!(schedule.periods().iter().all(|p| p.amortization == dec!(100)));
/// ```
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
    let monthly_rate = RateConverter::monthly_rate(terms.annual_rate());
    let amortization = terms.principal() / Decimal::from(terms.term_months());
    debug!(
        "SAC schedule for {}: monthly rate {}, amortization {}",
        terms, monthly_rate, amortization
    );

    let mut balance = terms.principal();
    let mut periods = Vec::with_capacity(terms.term_months() as usize);
    for month in 1..=terms.term_months() {
        let interest = balance * monthly_rate;
        let period = Period::new(month, balance, amortization, interest);
        balance = period.closing_balance;
        periods.push(period);
    }

    Schedule::from_periods(AmortizationSystem::ConstantAmortization, periods)
}
