//! Amortization systems and the engine that dispatches between them.

pub mod constant_amortization;
pub mod constant_installment;
pub mod hybrid;

use crate::core::loan::{AmortizationError, LoanTerms};
use crate::core::schedule::{AmortizationSystem, Schedule};
use log::warn;
use rust_decimal::Decimal;

/// The core schedule engine.
///
/// Every entry point validates its inputs before computing anything and
/// either returns a complete schedule or an [`AmortizationError`]. Calls
/// share no state and are safe to run concurrently.
///
/// # Examples
///
/// ```
/// use amortization_engine::systems::ScheduleEngine;
/// use rust_decimal_macros::dec;
///
/// let sac = ScheduleEngine::constant_amortization(dec!(100_000), dec!(0.12), 60).unwrap();
/// let price = ScheduleEngine::constant_installment(dec!(100_000), dec!(0.12), 60).unwrap();
/// assert!(sac.total_interest() < price.total_interest());
/// ```
pub struct ScheduleEngine;

impl ScheduleEngine {
    /// Constant amortization (SAC): equal principal repayments.
    pub fn constant_amortization(
        principal: Decimal,
        annual_rate: Decimal,
        term_months: u32,
    ) -> Result<Schedule, AmortizationError> {
        Self::compute(
            AmortizationSystem::ConstantAmortization,
            principal,
            annual_rate,
            term_months,
        )
    }

    /// Constant installment (PRICE): equal total payments.
    pub fn constant_installment(
        principal: Decimal,
        annual_rate: Decimal,
        term_months: u32,
    ) -> Result<Schedule, AmortizationError> {
        Self::compute(
            AmortizationSystem::ConstantInstallment,
            principal,
            annual_rate,
            term_months,
        )
    }

    /// Hybrid (SAM): installments averaged from SAC and PRICE.
    pub fn hybrid(
        principal: Decimal,
        annual_rate: Decimal,
        term_months: u32,
    ) -> Result<Schedule, AmortizationError> {
        Self::compute(AmortizationSystem::Hybrid, principal, annual_rate, term_months)
    }

    /// Build a schedule for `system`.
    pub fn compute(
        system: AmortizationSystem,
        principal: Decimal,
        annual_rate: Decimal,
        term_months: u32,
    ) -> Result<Schedule, AmortizationError> {
        let terms = LoanTerms::new(principal, annual_rate, term_months).map_err(|e| {
            warn!("{} rejected: {}", system, e);
            e
        })?;
        Ok(Self::schedule(system, &terms))
    }

    /// Build a schedule for `system` from already-validated terms.
    pub fn schedule(system: AmortizationSystem, terms: &LoanTerms) -> Schedule {
        match system {
            AmortizationSystem::ConstantAmortization => constant_amortization::build(terms),
            AmortizationSystem::ConstantInstallment => constant_installment::build(terms),
            AmortizationSystem::Hybrid => hybrid::build(terms),
        }
    }
}
