//! # amortization-engine
//!
//! Loan amortization schedules with decimal precision.
//!
//! Given a principal, a nominal annual rate and a term in months, the
//! engine builds the month-by-month schedule (opening balance,
//! amortization, interest, installment, closing balance) and its totals
//! under three repayment conventions:
//!
//! - **SAC** — constant amortization, decreasing installments
//! - **PRICE** — constant installment (French system)
//! - **SAM** — hybrid, averaging the SAC and PRICE installments
//!
//! ## Architecture
//!
//! - **core** — Rate conversion, validated loan terms, periods and schedules
//! - **systems** — The three amortization algorithms and the dispatching engine
//! - **analysis** — Side-by-side comparison of all systems for one loan
//! - **simulation** — Random loan generation for stress testing

pub mod analysis;
pub mod core;
pub mod systems;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analysis::comparison::{ScheduleComparison, ScheduleSummary, SystemOutcome};
    pub use crate::core::loan::{AmortizationError, InputField, LoanTerms};
    pub use crate::core::rate::RateConverter;
    pub use crate::core::schedule::{AmortizationSystem, Period, Schedule, BALANCE_TOLERANCE};
    pub use crate::systems::ScheduleEngine;
}
