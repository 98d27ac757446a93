//! Republika Srpska (RS) payroll calculation.
//!
//! RS adds a seniority increment to the contractual gross before anything
//! else, and all four contributions are withheld from the adjusted gross.
//! There are no employer contributions on top.

use super::common::{RateSheet, add_amounts, add_contributions, income_tax, sub_amounts};
use super::rounding::{SENIORITY_SCALE, scaled_round};
use crate::config::RuleResolver;
use crate::error::EngineResult;
use crate::models::{
    AllowancesBreakdown, CalculationInput, CalculationResult, ContributionCode,
    ContributionsBreakdown, Jurisdiction, RuleCode,
};

/// Calculates an RS payroll from the contractual gross.
///
/// The seniority increment is
/// `round(gross x seniority_hundredths x SENIORITY_RATE / 1_000_000)`, a
/// single rounding of the full product. It is added to gross and recorded
/// under `SENIORITY` in the breakdown, even when zero.
///
/// `contributions_on` is always zero and total cost equals the adjusted
/// gross.
///
/// # Errors
///
/// Returns `MissingRule` if any of the seven rules is not valid on the
/// effective date, and `CalculationError` if an amount overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_rs;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CalculationInput, Jurisdiction};
/// use chrono::NaiveDate;
///
/// let config = ConfigLoader::load("./config/bih").unwrap();
/// let input = CalculationInput::new(
///     Jurisdiction::Rs,
///     200_000,
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// )
/// .with_seniority(500);
///
/// let result = calculate_rs(&input, &config).unwrap();
/// assert_eq!(result.calculated_gross, 203_000);
/// assert_eq!(result.net_amount, 126_169);
/// ```
pub fn calculate_rs<R: RuleResolver + ?Sized>(
    input: &CalculationInput,
    rules: &R,
) -> EngineResult<CalculationResult> {
    let j = Jurisdiction::Rs;
    let mut sheet = RateSheet::new(rules, input.effective_date);

    let rates = [
        (ContributionCode::Pio, sheet.rate(j, RuleCode::Pio)?),
        (ContributionCode::Health, sheet.rate(j, RuleCode::Health)?),
        (
            ContributionCode::ChildProtection,
            sheet.rate(j, RuleCode::ChildProtection)?,
        ),
        (ContributionCode::Unemployment, sheet.rate(j, RuleCode::Unemployment)?),
    ];
    let tax_rate = sheet.rate(j, RuleCode::IncomeTax)?;
    let deduction_base = sheet.rate(j, RuleCode::PersonalDeduction)?;
    let seniority_rate = sheet.rate(j, RuleCode::SeniorityRate)?;

    let seniority_increase = scaled_round(
        &[input.gross_amount, input.seniority_hundredths, seniority_rate],
        SENIORITY_SCALE,
    )?;
    let gross = add_amounts(input.gross_amount, seniority_increase)?;

    let mut breakdown = ContributionsBreakdown::new();
    let contributions_from = add_contributions(&mut breakdown, gross, &rates)?;
    breakdown.insert(ContributionCode::Seniority, seniority_increase);

    let tax = income_tax(
        gross,
        contributions_from,
        deduction_base,
        input.tax_factor,
        tax_rate,
    )?;

    let net_amount = sub_amounts(sub_amounts(gross, contributions_from)?, tax.tax_amount)?;

    Ok(CalculationResult {
        calculated_gross: gross,
        contributions_from,
        contributions_on: 0,
        taxable_base: tax.taxable_base,
        tax_amount: tax.tax_amount,
        net_amount,
        total_cost: gross,
        contributions_breakdown: breakdown,
        allowances_breakdown: AllowancesBreakdown::new(),
        applied_rules: sheet.into_applied(),
    })
}
