//! Federation of Bosnia and Herzegovina (FBIH) payroll calculation.
//!
//! FBIH splits contributions into a part withheld from the employee's gross
//! (`*_FROM`) and a part the employer pays on top of it (`*_ON`). Only the
//! withheld part reduces the taxable base.

use super::common::{RateSheet, add_amounts, add_contributions, income_tax, sub_amounts};
use crate::config::RuleResolver;
use crate::error::EngineResult;
use crate::models::{
    AllowancesBreakdown, CalculationInput, CalculationResult, ContributionCode,
    ContributionsBreakdown, Jurisdiction, RuleCode,
};

/// Calculates an FBIH payroll from gross.
///
/// # Steps
///
/// 1. `contributions_from` = PIO_FROM + HEALTH_FROM + UNEMPLOYMENT_FROM on gross
/// 2. personal deduction = PERSONAL_DEDUCTION x tax factor
/// 3. taxable base = max(0, gross - contributions_from - deduction)
/// 4. tax = taxable base x INCOME_TAX
/// 5. net = gross - contributions_from - tax
/// 6. `contributions_on` = PIO_ON + HEALTH_ON + UNEMPLOYMENT_ON on gross
/// 7. total cost = gross + contributions_on
///
/// # Errors
///
/// Returns `MissingRule` if any of the eight rules has no version valid on
/// the input's effective date, and `CalculationError` if an amount
/// overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_fbih;
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
/// let result = calculate_fbih(&input, &config).unwrap();
/// assert_eq!(result.net_amount, 127_200);
/// assert_eq!(result.total_cost, 221_000);
/// ```
pub fn calculate_fbih<R: RuleResolver + ?Sized>(
    input: &CalculationInput,
    rules: &R,
) -> EngineResult<CalculationResult> {
    let j = Jurisdiction::Fbih;
    let mut sheet = RateSheet::new(rules, input.effective_date);

    let from_rates = [
        (ContributionCode::PioFrom, sheet.rate(j, RuleCode::PioFrom)?),
        (ContributionCode::HealthFrom, sheet.rate(j, RuleCode::HealthFrom)?),
        (
            ContributionCode::UnemploymentFrom,
            sheet.rate(j, RuleCode::UnemploymentFrom)?,
        ),
    ];
    let on_rates = [
        (ContributionCode::PioOn, sheet.rate(j, RuleCode::PioOn)?),
        (ContributionCode::HealthOn, sheet.rate(j, RuleCode::HealthOn)?),
        (
            ContributionCode::UnemploymentOn,
            sheet.rate(j, RuleCode::UnemploymentOn)?,
        ),
    ];
    let tax_rate = sheet.rate(j, RuleCode::IncomeTax)?;
    let deduction_base = sheet.rate(j, RuleCode::PersonalDeduction)?;

    let gross = input.gross_amount;
    let mut breakdown = ContributionsBreakdown::new();

    let contributions_from = add_contributions(&mut breakdown, gross, &from_rates)?;
    let tax = income_tax(
        gross,
        contributions_from,
        deduction_base,
        input.tax_factor,
        tax_rate,
    )?;
    let net_amount = sub_amounts(sub_amounts(gross, contributions_from)?, tax.tax_amount)?;

    let contributions_on = add_contributions(&mut breakdown, gross, &on_rates)?;
    let total_cost = add_amounts(gross, contributions_on)?;

    Ok(CalculationResult {
        calculated_gross: gross,
        contributions_from,
        contributions_on,
        taxable_base: tax.taxable_base,
        tax_amount: tax.tax_amount,
        net_amount,
        total_cost,
        contributions_breakdown: breakdown,
        allowances_breakdown: AllowancesBreakdown::new(),
        applied_rules: sheet.into_applied(),
    })
}
