//! Constant-installment system (PRICE / French system).
//!
//! Every installment is the same annuity payment; the interest share
//! shrinks as the balance falls, so amortization grows month over month.

use crate::core::loan::{AmortizationError, LoanTerms};
use crate::core::rate::RateConverter;
use crate::core::schedule::{AmortizationSystem, Period, Schedule};
use log::debug;
use rust_decimal::Decimal;

/// Validate the inputs and build a constant-installment schedule.
pub fn compute(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
) -> Result<Schedule, AmortizationError> {
    let terms = LoanTerms::new(principal, annual_rate, term_months)?;
    Ok(build(&terms))
}

/// Fixed annuity payment for `principal` over `periods` at `monthly_rate`.
///
/// Uses `P * i / (1 - (1 + i)^-n)`, which equals the textbook
/// `P * i(1+i)^n / ((1+i)^n - 1)` but works with discount factors that
/// shrink toward zero instead of growth factors that can overflow. A zero
/// rate degenerates to `P / n`.
pub fn installment(principal: Decimal, monthly_rate: Decimal, periods: u32) -> Decimal {
    let n = Decimal::from(periods);
    if monthly_rate.is_zero() {
        return principal / n;
    }
    let discount = Decimal::ONE / (Decimal::ONE + monthly_rate);
    let remaining = Decimal::ONE - RateConverter::compound(discount, periods);
    if remaining.is_zero() {
        return principal / n;
    }
    principal * monthly_rate / remaining
}

/// Build the schedule for already-validated terms.
///
/// Month `k` amortizes `installment * v^(n-k+1)` with `v = 1 / (1 + i)`,
/// the present value of that installment at the start of the month.
/// Interest is the rest of the installment, which equals `balance * i`.
/// Errors stay additive along the roll-forward instead of compounding by
/// `(1 + i)` each month. The last month retires whatever balance remains.
pub(crate) fn build(terms: &LoanTerms) -> Schedule {
    let monthly_rate = RateConverter::monthly_rate(terms.annual_rate());
    let term = terms.term_months();
    let payment = installment(terms.principal(), monthly_rate, term);
    debug!(
        "PRICE schedule for {}: monthly rate {}, installment {}",
        terms, monthly_rate, payment
    );

    // discount_powers[j] = v^(j + 1); underflows to zero for very large j * i.
    let discount = Decimal::ONE / (Decimal::ONE + monthly_rate);
    let mut discount_powers = Vec::with_capacity(term as usize);
    let mut factor = Decimal::ONE;
    for _ in 0..term {
        factor *= discount;
        discount_powers.push(factor);
    }

    let mut balance = terms.principal();
    let mut periods = Vec::with_capacity(term as usize);
    for month in 1..=term {
        let amortization = if month == term {
            balance
        } else {
            payment * discount_powers[(term - month) as usize]
        };
        let period = Period::new(month, balance, amortization, payment - amortization);
        balance = period.closing_balance;
        periods.push(period);
    }

    Schedule::from_periods(AmortizationSystem::ConstantInstallment, periods)
}
