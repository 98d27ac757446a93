//! Brcko District (BD) payroll calculation.
//!
//! BD employees pay pension into either the FBIH or the RS fund, so the
//! pension rate is borrowed from the chosen entity's rules while health,
//! unemployment, tax and deduction come from BD's own rules.

use super::common::{RateSheet, add_contributions, income_tax, sub_amounts};
use crate::config::RuleResolver;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowancesBreakdown, CalculationInput, CalculationResult, ContributionCode,
    ContributionsBreakdown, Jurisdiction, PensionFundChoice, RuleCode,
};

/// Returns where the pension rate for a fund choice is looked up.
pub fn pension_rule(choice: PensionFundChoice) -> (Jurisdiction, RuleCode) {
    match choice {
        PensionFundChoice::FbihFund => (Jurisdiction::Fbih, RuleCode::PioFrom),
        PensionFundChoice::RsFund => (Jurisdiction::Rs, RuleCode::Pio),
    }
}

/// Calculates a BD payroll from gross.
///
/// All contributions are withheld from gross; `contributions_on` is zero and
/// total cost equals gross.
///
/// # Errors
///
/// Returns `MissingPensionChoice` when the input has no pension fund, before
/// any rule is looked up, and `MissingRule` for an unresolved rule.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_bd;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CalculationInput, Jurisdiction, PensionFundChoice};
/// use chrono::NaiveDate;
///
/// let config = ConfigLoader::load("./config/bih").unwrap();
/// let input = CalculationInput::new(
///     Jurisdiction::Bd,
///     200_000,
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// )
/// .with_pension_fund(PensionFundChoice::RsFund);
///
/// let result = calculate_bd(&input, &config).unwrap();
/// assert_eq!(result.net_amount, 125_400);
/// ```
pub fn calculate_bd<R: RuleResolver + ?Sized>(
    input: &CalculationInput,
    rules: &R,
) -> EngineResult<CalculationResult> {
    let choice = input
        .pension_fund_choice
        .ok_or(EngineError::MissingPensionChoice)?;

    let j = Jurisdiction::Bd;
    let mut sheet = RateSheet::new(rules, input.effective_date);

    let (pension_jurisdiction, pension_code) = pension_rule(choice);
    let rates = [
        (
            ContributionCode::Pio,
            sheet.rate(pension_jurisdiction, pension_code)?,
        ),
        (ContributionCode::Health, sheet.rate(j, RuleCode::Health)?),
        (ContributionCode::Unemployment, sheet.rate(j, RuleCode::Unemployment)?),
    ];
    let tax_rate = sheet.rate(j, RuleCode::IncomeTax)?;
    let deduction_base = sheet.rate(j, RuleCode::PersonalDeduction)?;

    let gross = input.gross_amount;
    let mut breakdown = ContributionsBreakdown::new();
    let contributions_from = add_contributions(&mut breakdown, gross, &rates)?;

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
