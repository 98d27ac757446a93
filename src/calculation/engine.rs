//! Jurisdiction dispatch for forward calculations.

use tracing::debug;

use super::bd::calculate_bd;
use super::fbih::calculate_fbih;
use super::rs::calculate_rs;
use crate::config::RuleResolver;
use crate::error::EngineResult;
use crate::models::{CalculationInput, CalculationResult, Jurisdiction};

/// Validates the input and runs the calculator for its jurisdiction.
///
/// # Errors
///
/// - `InvalidInput` for a negative gross, tax factor or seniority
/// - `MissingPensionChoice` for BD without a pension fund
/// - `MissingRule` when a required rule is not valid on the effective date
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CalculationInput, Jurisdiction};
/// use chrono::NaiveDate;
///
/// let config = ConfigLoader::load("./config/bih").unwrap();
/// let input = CalculationInput::new(
///     Jurisdiction::Fbih,
///     200_000,
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// );
///
/// let result = calculate_payroll(&input, &config).unwrap();
/// assert_eq!(result.net_amount, 127_200);
/// ```
pub fn calculate_payroll<R: RuleResolver + ?Sized>(
    input: &CalculationInput,
    rules: &R,
) -> EngineResult<CalculationResult> {
    input.validate()?;

    let result = match input.jurisdiction {
        Jurisdiction::Fbih => calculate_fbih(input, rules),
        Jurisdiction::Rs => calculate_rs(input, rules),
        Jurisdiction::Bd => calculate_bd(input, rules),
    }?;

    debug!(
        jurisdiction = %input.jurisdiction,
        gross = input.gross_amount,
        effective_date = %input.effective_date,
        net = result.net_amount,
        total_cost = result.total_cost,
        "Calculated payroll"
    );

    Ok(result)
}
