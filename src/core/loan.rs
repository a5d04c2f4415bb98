use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The loan parameter a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Principal,
    AnnualRate,
    TermMonths,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Principal => "principal",
            InputField::AnnualRate => "annual rate",
            InputField::TermMonths => "term",
        };
        write!(f, "{}", name)
    }
}

/// Errors arising from schedule computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmortizationError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: InputField,
        reason: &'static str,
    },
}

impl AmortizationError {
    /// The parameter that failed validation.
    pub fn field(&self) -> InputField {
        match self {
            AmortizationError::InvalidInput { field, .. } => *field,
        }
    }
}

/// Validated loan parameters.
///
/// Construction is the single validation point shared by every
/// amortization system: once a `LoanTerms` exists, its principal is
/// positive, its annual rate is non-negative and its term is at least one
/// month.
///
/// # Examples
///
/// ```
/// use amortization_engine::core::loan::{InputField, LoanTerms};
/// use rust_decimal_macros::dec;
///
/// let terms = LoanTerms::new(dec!(100_000), dec!(0.12), 60).unwrap();
/// assert_eq!(terms.term_months(), 60);
///
/// let err = LoanTerms::new(dec!(0), dec!(0.12), 60).unwrap_err();
/// assert_eq!(err.field(), InputField::Principal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    principal: Decimal,
    /// Nominal annual rate as a decimal fraction (0.12 = 12%).
    annual_rate: Decimal,
    /// Number of monthly periods.
    term_months: u32,
}

impl LoanTerms {
    /// Validate and build loan terms.
    ///
    /// Checks run in order principal, annual rate, term; the first
    /// violation is reported.
    pub fn new(
        principal: Decimal,
        annual_rate: Decimal,
        term_months: u32,
    ) -> Result<Self, AmortizationError> {
        if principal <= Decimal::ZERO {
            return Err(AmortizationError::InvalidInput {
                field: InputField::Principal,
                reason: "principal must be greater than zero",
            });
        }
        if annual_rate < Decimal::ZERO {
            return Err(AmortizationError::InvalidInput {
                field: InputField::AnnualRate,
                reason: "annual rate cannot be negative",
            });
        }
        if term_months == 0 {
            return Err(AmortizationError::InvalidInput {
                field: InputField::TermMonths,
                reason: "number of installments must be greater than zero",
            });
        }
        Ok(Self {
            principal,
            annual_rate,
            term_months,
        })
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }
}

impl fmt::Display for LoanTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}% a year over {} months",
            self.principal,
            self.annual_rate * Decimal::ONE_HUNDRED,
            self.term_months
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_terms() {
        let terms = LoanTerms::new(dec!(100_000), dec!(0.12), 60).unwrap();
        assert_eq!(terms.principal(), dec!(100_000));
        assert_eq!(terms.annual_rate(), dec!(0.12));
        assert_eq!(terms.term_months(), 60);
    }

    #[test]
    fn test_zero_rate_is_valid() {
        assert!(LoanTerms::new(dec!(1000), Decimal::ZERO, 12).is_ok());
    }

    #[test]
    fn test_zero_principal() {
        let err = LoanTerms::new(Decimal::ZERO, dec!(0.12), 60).unwrap_err();
        assert_eq!(err.field(), InputField::Principal);
    }

    #[test]
    fn test_negative_principal() {
        let err = LoanTerms::new(dec!(-500), dec!(0.12), 60).unwrap_err();
        assert_eq!(err.field(), InputField::Principal);
    }

    #[test]
    fn test_negative_rate() {
        let err = LoanTerms::new(dec!(100_000), dec!(-0.1), 60).unwrap_err();
        assert_eq!(err.field(), InputField::AnnualRate);
    }

    #[test]
    fn test_zero_term() {
        let err = LoanTerms::new(dec!(100_000), dec!(0.12), 0).unwrap_err();
        assert_eq!(err.field(), InputField::TermMonths);
    }

    #[test]
    fn test_principal_reported_first() {
        let err = LoanTerms::new(Decimal::ZERO, dec!(-1), 0).unwrap_err();
        assert_eq!(err.field(), InputField::Principal);
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let principal = LoanTerms::new(Decimal::ZERO, dec!(0.1), 1).unwrap_err();
        let rate = LoanTerms::new(dec!(1), dec!(-0.1), 1).unwrap_err();
        let term = LoanTerms::new(dec!(1), dec!(0.1), 0).unwrap_err();
        assert_eq!(
            principal.to_string(),
            "invalid principal: principal must be greater than zero"
        );
        assert_ne!(principal.to_string(), rate.to_string());
        assert_ne!(rate.to_string(), term.to_string());
    }
}
