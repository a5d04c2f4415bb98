use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Absolute tolerance used when checking schedule invariants.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.000001);

/// Repayment convention used to build a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationSystem {
    /// SAC: constant principal repayment, decreasing installments.
    ConstantAmortization,
    /// PRICE (French system): constant installment, increasing amortization.
    ConstantInstallment,
    /// SAM: installment is the mean of the SAC and PRICE installments.
    Hybrid,
}

impl AmortizationSystem {
    /// Every system, in display order.
    pub const ALL: [AmortizationSystem; 3] = [
        AmortizationSystem::ConstantAmortization,
        AmortizationSystem::ConstantInstallment,
        AmortizationSystem::Hybrid,
    ];

    /// Short market name (SAC, PRICE, SAM).
    pub fn code(&self) -> &'static str {
        match self {
            AmortizationSystem::ConstantAmortization => "SAC",
            AmortizationSystem::ConstantInstallment => "PRICE",
            AmortizationSystem::Hybrid => "SAM",
        }
    }
}

impl fmt::Display for AmortizationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unrecognised amortization system name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown amortization system '{0}' (expected sac, price or sam)")]
pub struct UnknownSystem(pub String);

impl FromStr for AmortizationSystem {
    type Err = UnknownSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sac" | "constant-amortization" | "constant_amortization" => {
                Ok(AmortizationSystem::ConstantAmortization)
            }
            "price" | "french" | "constant-installment" | "constant_installment" => {
                Ok(AmortizationSystem::ConstantInstallment)
            }
            "sam" | "hybrid" | "mixed" => Ok(AmortizationSystem::Hybrid),
            _ => Err(UnknownSystem(s.to_string())),
        }
    }
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 1-based month number.
    pub month: u32,
    /// Outstanding principal before this period's payment.
    pub opening_balance: Decimal,
    /// Principal portion of the payment.
    pub amortization: Decimal,
    /// Interest portion of the payment.
    pub interest: Decimal,
    /// Total payment: amortization + interest.
    pub installment: Decimal,
    /// Outstanding principal after the payment.
    pub closing_balance: Decimal,
}

impl Period {
    /// Build a period from its opening balance and payment split.
    pub(crate) fn new(
        month: u32,
        opening_balance: Decimal,
        amortization: Decimal,
        interest: Decimal,
    ) -> Self {
        Self {
            month,
            opening_balance,
            amortization,
            interest,
            installment: amortization + interest,
            closing_balance: opening_balance - amortization,
        }
    }

    /// Whether the payment split and balance roll-forward agree within `tolerance`.
    pub fn is_consistent(&self, tolerance: Decimal) -> bool {
        let split = (self.installment - (self.amortization + self.interest)).abs();
        let roll = (self.closing_balance - (self.opening_balance - self.amortization)).abs();
        split <= tolerance && roll <= tolerance
    }
}

/// A complete amortization schedule with aggregate totals.
///
/// Schedules are immutable once built. Periods are in chronological order
/// and there is exactly one per month of the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// System that produced this schedule.
    system: AmortizationSystem,
    /// Month-by-month breakdown.
    periods: Vec<Period>,
    /// Sum of all interest paid.
    total_interest: Decimal,
    /// Sum of all installments.
    total_paid: Decimal,
}

impl Schedule {
    /// Assemble a schedule, accumulating totals from the periods.
    pub(crate) fn from_periods(system: AmortizationSystem, periods: Vec<Period>) -> Self {
        let mut total_interest = Decimal::ZERO;
        let mut total_paid = Decimal::ZERO;
        for period in &periods {
            total_interest += period.interest;
            total_paid += period.installment;
        }
        Self {
            system,
            periods,
            total_interest,
            total_paid,
        }
    }

    // --- Accessors ---

    pub fn system(&self) -> AmortizationSystem {
        self.system
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }

    /// Amount borrowed (opening balance of the first period).
    pub fn principal(&self) -> Decimal {
        self.periods
            .first()
            .map(|p| p.opening_balance)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn first_installment(&self) -> Option<Decimal> {
        self.periods.first().map(|p| p.installment)
    }

    pub fn last_installment(&self) -> Option<Decimal> {
        self.periods.last().map(|p| p.installment)
    }

    pub fn min_installment(&self) -> Option<Decimal> {
        self.periods.iter().map(|p| p.installment).min()
    }

    pub fn max_installment(&self) -> Option<Decimal> {
        self.periods.iter().map(|p| p.installment).max()
    }

    /// Balance left after the last period. Zero (within tolerance) for a
    /// fully retired loan.
    pub fn final_balance(&self) -> Decimal {
        self.periods
            .last()
            .map(|p| p.closing_balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Check every schedule invariant within `tolerance`:
    ///
    /// - each period's split and balance roll-forward agree
    /// - months run 1..=n and each opening balance equals the previous closing balance
    /// - the loan is fully retired
    /// - total paid equals principal plus total interest
    pub fn is_consistent(&self, tolerance: Decimal) -> bool {
        let mut expected_opening = self.principal();
        for (idx, period) in self.periods.iter().enumerate() {
            if period.month as usize != idx + 1 {
                return false;
            }
            if (period.opening_balance - expected_opening).abs() > tolerance {
                return false;
            }
            if !period.is_consistent(tolerance) {
                return false;
            }
            expected_opening = period.closing_balance;
        }
        let totals_gap = (self.total_paid - (self.principal() + self.total_interest)).abs();
        self.final_balance().abs() <= tolerance && totals_gap <= tolerance
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} Schedule ===", self.system)?;
        writeln!(
            f,
            "{:>5} {:>16} {:>14} {:>14} {:>14} {:>16}",
            "Month", "Opening", "Amortization", "Interest", "Installment", "Closing"
        )?;
        for p in &self.periods {
            writeln!(
                f,
                "{:>5} {:>16} {:>14} {:>14} {:>14} {:>16}",
                p.month,
                p.opening_balance.round_dp(2),
                p.amortization.round_dp(2),
                p.interest.round_dp(2),
                p.installment.round_dp(2),
                p.closing_balance.round_dp(2).normalize(),
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total Interest: {}", self.total_interest.round_dp(2))?;
        writeln!(f, "Total Paid:     {}", self.total_paid.round_dp(2))?;
        Ok(())
    }
}
