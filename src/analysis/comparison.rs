use crate::core::loan::LoanTerms;
use crate::core::schedule::{AmortizationSystem, Schedule};
use crate::systems::ScheduleEngine;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline figures for one computed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub system: AmortizationSystem,
    pub periods: usize,
    pub total_interest: Decimal,
    pub total_paid: Decimal,
    pub first_installment: Decimal,
    pub last_installment: Decimal,
    pub min_installment: Decimal,
    pub max_installment: Decimal,
    /// The full schedule behind these figures.
    pub schedule: Schedule,
}

impl ScheduleSummary {
    pub fn from_schedule(schedule: Schedule) -> Self {
        ScheduleSummary {
            system: schedule.system(),
            periods: schedule.len(),
            total_interest: schedule.total_interest(),
            total_paid: schedule.total_paid(),
            first_installment: schedule.first_installment().unwrap_or(Decimal::ZERO),
            last_installment: schedule.last_installment().unwrap_or(Decimal::ZERO),
            min_installment: schedule.min_installment().unwrap_or(Decimal::ZERO),
            max_installment: schedule.max_installment().unwrap_or(Decimal::ZERO),
            schedule,
        }
    }
}

/// Outcome of one system within a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemOutcome {
    Computed(Box<ScheduleSummary>),
    Failed(String),
}

impl SystemOutcome {
    pub fn summary(&self) -> Option<&ScheduleSummary> {
        match self {
            SystemOutcome::Computed(summary) => Some(&**summary),
            SystemOutcome::Failed(_) => None,
        }
    }
}

/// Side-by-side run of every amortization system for the same loan.
///
/// A failure in one system is recorded against that system and never
/// aborts the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleComparison {
    pub principal: Decimal,
    pub annual_rate: Decimal,
    pub term_months: u32,
    pub outcomes: BTreeMap<AmortizationSystem, SystemOutcome>,
}

impl ScheduleComparison {
    /// Compute every system for the given loan.
    pub fn run(principal: Decimal, annual_rate: Decimal, term_months: u32) -> Self {
        let outcomes = AmortizationSystem::ALL
            .iter()
            .map(|&system| {
                let outcome =
                    match ScheduleEngine::compute(system, principal, annual_rate, term_months) {
                        Ok(schedule) => {
                            SystemOutcome::Computed(Box::new(ScheduleSummary::from_schedule(schedule)))
                        }
                        Err(e) => SystemOutcome::Failed(e.to_string()),
                    };
                (system, outcome)
            })
            .collect();

        ScheduleComparison {
            principal,
            annual_rate,
            term_months,
            outcomes,
        }
    }

    /// Compute every system for already-validated terms.
    pub fn from_terms(terms: &LoanTerms) -> Self {
        Self::run(terms.principal(), terms.annual_rate(), terms.term_months())
    }

    pub fn summary(&self, system: AmortizationSystem) -> Option<&ScheduleSummary> {
        self.outcomes.get(&system).and_then(SystemOutcome::summary)
    }

    /// Whether every system produced a schedule.
    pub fn all_computed(&self) -> bool {
        self.outcomes.values().all(|o| o.summary().is_some())
    }

    /// How much less `system` costs in total than `baseline`.
    /// Negative when `system` is the more expensive one.
    pub fn savings_vs(
        &self,
        system: AmortizationSystem,
        baseline: AmortizationSystem,
    ) -> Option<Decimal> {
        let ours = self.summary(system)?;
        let theirs = self.summary(baseline)?;
        Some(theirs.total_paid - ours.total_paid)
    }

    /// Savings against `baseline` as a percentage of the baseline's total paid.
    pub fn savings_percent_vs(
        &self,
        system: AmortizationSystem,
        baseline: AmortizationSystem,
    ) -> Option<f64> {
        let savings = self.savings_vs(system, baseline)?;
        let base = self.summary(baseline)?.total_paid;
        if base.is_zero() {
            return None;
        }
        (savings * Decimal::ONE_HUNDRED / base).to_f64()
    }

    /// The computed system with the lowest total paid.
    pub fn cheapest(&self) -> Option<AmortizationSystem> {
        self.outcomes
            .values()
            .filter_map(SystemOutcome::summary)
            .min_by_key(|s| s.total_paid)
            .map(|s| s.system)
    }
}

impl std::fmt::Display for ScheduleComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Amortization Comparison ===")?;
        writeln!(f, "Principal:   {}", self.principal)?;
        writeln!(f, "Annual Rate: {}%", self.annual_rate * Decimal::ONE_HUNDRED)?;
        writeln!(f, "Term:        {} months", self.term_months)?;

        let cheapest = self.cheapest();
        for (system, outcome) in &self.outcomes {
            writeln!(f, "\n--- {} ---", system)?;
            match outcome {
                SystemOutcome::Computed(s) => {
                    writeln!(f, "  Total Interest:    {}", s.total_interest.round_dp(2))?;
                    writeln!(f, "  Total Paid:        {}", s.total_paid.round_dp(2))?;
                    writeln!(f, "  First Installment: {}", s.first_installment.round_dp(2))?;
                    writeln!(f, "  Last Installment:  {}", s.last_installment.round_dp(2))?;
                    writeln!(f, "  Min Installment:   {}", s.min_installment.round_dp(2))?;
                    writeln!(f, "  Max Installment:   {}", s.max_installment.round_dp(2))?;
                    if let Some(pct) =
                        self.savings_percent_vs(*system, AmortizationSystem::ConstantInstallment)
                    {
                        writeln!(f, "  Savings vs PRICE:  {:.2}%", pct)?;
                    }
                    if cheapest == Some(*system) {
                        writeln!(f, "  (lowest total paid)")?;
                    }
                }
                SystemOutcome::Failed(reason) => {
                    writeln!(f, "  Error: {}", reason)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_comparison_reference_scenario() {
        let cmp = ScheduleComparison::run(dec!(100_000), dec!(0.12), 60);
        assert!(cmp.all_computed());
        assert_eq!(cmp.cheapest(), Some(AmortizationSystem::ConstantAmortization));

        let savings = cmp
            .savings_vs(
                AmortizationSystem::ConstantAmortization,
                AmortizationSystem::ConstantInstallment,
            )
            .unwrap();
        assert_eq!(savings.round_dp(2), dec!(2673.36));
    }

    #[test]
    fn test_summary_statistics() {
        let cmp = ScheduleComparison::run(dec!(100_000), dec!(0.12), 60);
        let sac = cmp.summary(AmortizationSystem::ConstantAmortization).unwrap();
        assert_eq!(sac.periods, 60);
        assert_eq!(sac.max_installment, sac.first_installment);
        assert_eq!(sac.min_installment, sac.last_installment);

        let price = cmp.summary(AmortizationSystem::ConstantInstallment).unwrap();
        assert_eq!(price.min_installment, price.max_installment);
    }

    #[test]
    fn test_invalid_input_fails_every_system_without_panicking() {
        let cmp = ScheduleComparison::run(dec!(100_000), dec!(0.12), 0);
        assert!(!cmp.all_computed());
        assert_eq!(cmp.outcomes.len(), 3);
        for outcome in cmp.outcomes.values() {
            match outcome {
                SystemOutcome::Failed(reason) => assert!(reason.contains("term")),
                SystemOutcome::Computed(_) => panic!("expected failure"),
            }
        }
        assert_eq!(cmp.cheapest(), None);
        assert_eq!(
            cmp.savings_vs(AmortizationSystem::Hybrid, AmortizationSystem::ConstantInstallment),
            None
        );
    }

    #[test]
    fn test_baseline_saves_nothing_against_itself() {
        let cmp = ScheduleComparison::run(dec!(50_000), dec!(0.09), 36);
        let same = cmp
            .savings_vs(
                AmortizationSystem::ConstantInstallment,
                AmortizationSystem::ConstantInstallment,
            )
            .unwrap();
        assert_eq!(same, Decimal::ZERO);
    }
}
