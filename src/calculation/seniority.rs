//! Years-of-service derivation for period runs.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};

/// Days counted as one year of service.
pub const DAYS_PER_SERVICE_YEAR: i64 = 365;

/// Returns seniority in hundredths of a year as of `as_of`.
///
/// Elapsed service is counted in whole years of 365 days since
/// `tenure_start` (a tenure starting after `as_of` counts as zero), then
/// service brought from previous employers is added.
///
/// # Errors
///
/// Returns `CalculationError` if the total does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::seniority_hundredths;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// // 1461 days = 4 whole years, plus 2 previous years
/// assert_eq!(seniority_hundredths(start, 2, as_of).unwrap(), 600);
/// ```
pub fn seniority_hundredths(
    tenure_start: NaiveDate,
    previous_years: i64,
    as_of: NaiveDate,
) -> EngineResult<i64> {
    let days = (as_of - tenure_start).num_days();
    let elapsed_years = (days / DAYS_PER_SERVICE_YEAR).max(0);
    elapsed_years
        .checked_add(previous_years)
        .and_then(|years| years.checked_mul(100))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "seniority overflow: {} elapsed plus {} previous years",
                elapsed_years, previous_years
            ),
        })
}
