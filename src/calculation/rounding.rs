//! Scaled-integer arithmetic for monetary line items.
//!
//! Every line item is an integer product divided once by a power-of-ten
//! scale and rounded half away from zero. The division runs on
//! [`Decimal`], which is exact for these divisors, so there is no binary
//! floating point anywhere in the path.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::Money;

/// Divisor for rates stored in basis points (1700 = 17.00%).
pub const RATE_SCALE: i64 = 10_000;

/// Divisor for percentage factors (100 = 1.0x).
pub const PERCENT_SCALE: i64 = 100;

/// Divisor for amount x hundredths-of-a-year x basis-point rate.
pub const SENIORITY_SCALE: i64 = 1_000_000;

/// Multiplies `factors` together, divides by `divisor` and rounds to a whole
/// subunit, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::scaled_round;
///
/// // 17% of 1234.56 KM: 123456 * 1700 / 10000 = 20987.52
/// assert_eq!(scaled_round(&[123_456, 1_700], 10_000).unwrap(), 20_988);
/// // exactly half rounds away from zero
/// assert_eq!(scaled_round(&[5], 10).unwrap(), 1);
/// assert_eq!(scaled_round(&[-5], 10).unwrap(), -1);
/// ```
pub fn scaled_round(factors: &[i64], divisor: i64) -> EngineResult<Money> {
    let product = factors
        .iter()
        .try_fold(Decimal::ONE, |acc, &factor| acc.checked_mul(Decimal::from(factor)))
        .ok_or_else(|| overflow(factors, divisor))?;

    let quotient = product
        .checked_div(Decimal::from(divisor))
        .ok_or_else(|| overflow(factors, divisor))?;

    quotient
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| overflow(factors, divisor))
}

/// Applies a basis-point rate to an amount: `round(amount * rate / 10000)`.
pub fn apply_rate(amount: Money, rate_bp: i64) -> EngineResult<Money> {
    scaled_round(&[amount, rate_bp], RATE_SCALE)
}

/// Applies a percentage factor to an amount: `round(amount * factor / 100)`.
pub fn apply_percent(amount: Money, factor: i64) -> EngineResult<Money> {
    scaled_round(&[amount, factor], PERCENT_SCALE)
}

fn overflow(factors: &[i64], divisor: i64) -> EngineError {
    EngineError::CalculationError {
        message: format!("arithmetic overflow computing {:?} / {}", factors, divisor),
    }
}
