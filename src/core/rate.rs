use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number of compounding periods in a year.
pub const MONTHS_PER_YEAR: u32 = 12;

const ROOT_TOLERANCE: Decimal = dec!(0.00000000000000000000000001);
const MAX_ROOT_ITERATIONS: usize = 32;

/// Converts between nominal annual rates and their compounding-equivalent
/// monthly rates.
///
/// The conversion is compound equivalence, not division by twelve: the
/// monthly rate compounded over twelve periods reproduces the annual rate.
///
/// # Examples
///
/// ```
/// use amortization_engine::core::rate::RateConverter;
/// use rust_decimal_macros::dec;
///
/// let monthly = RateConverter::monthly_rate(dec!(0.12));
/// assert!(monthly < dec!(0.01)); // less than the naive 12% / 12
///
/// let annual = RateConverter::annual_rate(monthly);
/// assert!((annual - dec!(0.12)).abs() < dec!(0.000000000001));
/// ```
pub struct RateConverter;

impl RateConverter {
    /// Monthly rate equivalent to `annual_rate`: `(1 + annual)^(1/12) - 1`.
    ///
    /// No validation happens here. A zero annual rate maps to exactly zero;
    /// when `1 + annual_rate <= 0` there is no real root and `-1` is returned.
    pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
        let growth = Decimal::ONE + annual_rate;
        if growth <= Decimal::ZERO {
            return Decimal::NEGATIVE_ONE;
        }
        nth_root(growth, MONTHS_PER_YEAR) - Decimal::ONE
    }

    /// Annual rate equivalent to `monthly_rate`: `(1 + monthly)^12 - 1`.
    pub fn annual_rate(monthly_rate: Decimal) -> Decimal {
        Self::compound(Decimal::ONE + monthly_rate, MONTHS_PER_YEAR) - Decimal::ONE
    }

    /// `base^periods` by repeated multiplication.
    ///
    /// Saturates to `Decimal::MAX` instead of overflowing.
    pub fn compound(base: Decimal, periods: u32) -> Decimal {
        let mut result = Decimal::ONE;
        for _ in 0..periods {
            result = match result.checked_mul(base) {
                Some(value) => value,
                None => return Decimal::MAX,
            };
        }
        result
    }
}

/// Positive real `n`-th root of `value` (`value > 0`, `n > 0`).
///
/// Seeded from `f64` and refined with Newton's method on `x^n = value`,
/// which converges quadratically once the seed is within f64 precision.
fn nth_root(value: Decimal, n: u32) -> Decimal {
    if value == Decimal::ONE || n == 1 {
        return value;
    }

    let seed = value
        .to_f64()
        .map(|v| v.powf(1.0 / f64::from(n)))
        .and_then(Decimal::from_f64)
        .filter(|s| *s > Decimal::ZERO)
        .unwrap_or(Decimal::ONE);

    let n_dec = Decimal::from(n);
    let n_minus_one = n_dec - Decimal::ONE;
    let mut x = seed;

    for _ in 0..MAX_ROOT_ITERATIONS {
        // x_{k+1} = ((n - 1) * x + value / x^(n-1)) / n
        let power = RateConverter::compound(x, n - 1);
        if power.is_zero() {
            break;
        }
        let next = (n_minus_one * x + value / power) / n_dec;
        let delta = (next - x).abs();
        x = next;
        if delta < ROOT_TOLERANCE {
            break;
        }
    }
    x
}
