//! Steps shared by the jurisdiction calculators.
//!
//! Every calculator resolves its rates through a [`RateSheet`], which keeps
//! the applied rule versions for the result trace, then runs the same
//! contribution and income tax steps over its own rate table.

use chrono::NaiveDate;

use super::rounding::{apply_percent, apply_rate};
use crate::config::RuleResolver;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AppliedRule, ContributionCode, ContributionsBreakdown, Jurisdiction, Money, RuleCode,
};

/// Resolves the rates of one calculation and remembers what it used.
pub(crate) struct RateSheet<'a, R: RuleResolver + ?Sized> {
    rules: &'a R,
    as_of: NaiveDate,
    applied: Vec<AppliedRule>,
}

impl<'a, R: RuleResolver + ?Sized> RateSheet<'a, R> {
    pub(crate) fn new(rules: &'a R, as_of: NaiveDate) -> Self {
        Self {
            rules,
            as_of,
            applied: Vec::new(),
        }
    }

    /// Returns the value of a required rule, or `MissingRule`.
    pub(crate) fn rate(&mut self, jurisdiction: Jurisdiction, code: RuleCode) -> EngineResult<i64> {
        let rule = self.rules.require(jurisdiction, code, self.as_of)?;
        self.applied.push(AppliedRule::from(&rule));
        Ok(rule.rate_value)
    }

    /// Consumes the sheet, returning the rule versions in lookup order.
    pub(crate) fn into_applied(self) -> Vec<AppliedRule> {
        self.applied
    }
}

/// Applies each rate to `base`, records the amounts and returns their sum.
pub(crate) fn add_contributions(
    breakdown: &mut ContributionsBreakdown,
    base: Money,
    rates: &[(ContributionCode, i64)],
) -> EngineResult<Money> {
    let mut total = 0;
    for &(code, rate) in rates {
        let amount = apply_rate(base, rate)?;
        breakdown.insert(code, amount);
        total = add_amounts(total, amount)?;
    }
    Ok(total)
}

/// `a + b`, or `CalculationError` on overflow.
pub(crate) fn add_amounts(a: Money, b: Money) -> EngineResult<Money> {
    a.checked_add(b).ok_or_else(|| overflow(a, '+', b))
}

/// `a - b`, or `CalculationError` on overflow.
pub(crate) fn sub_amounts(a: Money, b: Money) -> EngineResult<Money> {
    a.checked_sub(b).ok_or_else(|| overflow(a, '-', b))
}

fn overflow(a: Money, op: char, b: Money) -> EngineError {
    EngineError::CalculationError {
        message: format!("arithmetic overflow computing {} {} {}", a, op, b),
    }
}

/// The income tax step of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IncomeTax {
    pub(crate) taxable_base: Money,
    pub(crate) tax_amount: Money,
}

/// Computes the taxable base and the flat income tax on it.
///
/// The personal deduction is the deduction base scaled by the employee's tax
/// factor. The taxable base never goes below zero.
pub(crate) fn income_tax(
    gross: Money,
    contributions_from: Money,
    deduction_base: Money,
    tax_factor: i64,
    tax_rate: i64,
) -> EngineResult<IncomeTax> {
    let personal_deduction = apply_percent(deduction_base, tax_factor)?;
    let taxable_base =
        sub_amounts(sub_amounts(gross, contributions_from)?, personal_deduction)?.max(0);
    let tax_amount = apply_rate(taxable_base, tax_rate)?;
    Ok(IncomeTax {
        taxable_base,
        tax_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::example_rules;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_income_tax_with_default_factor() {
        let tax = income_tax(200_000, 62_000, 30_000, 100, 1_000).unwrap();
        assert_eq!(tax.taxable_base, 108_000);
        assert_eq!(tax.tax_amount, 10_800);
    }

    #[test]
    fn test_income_tax_scales_deduction_by_factor() {
        // deduction 30000 x 1.5 = 45000
        let tax = income_tax(100_000, 31_000, 30_000, 150, 1_000).unwrap();
        assert_eq!(tax.taxable_base, 24_000);
        assert_eq!(tax.tax_amount, 2_400);
    }

    #[test]
    fn test_taxable_base_is_floored_at_zero() {
        let tax = income_tax(30_000, 9_300, 30_000, 100, 1_000).unwrap();
        assert_eq!(tax.taxable_base, 0);
        assert_eq!(tax.tax_amount, 0);
    }

    #[test]
    fn test_add_contributions_records_each_component() {
        let mut breakdown = ContributionsBreakdown::new();
        let total = add_contributions(
            &mut breakdown,
            200_000,
            &[
                (ContributionCode::Pio, 1_850),
                (ContributionCode::ChildProtection, 170),
            ],
        )
        .unwrap();

        assert_eq!(total, 40_400);
        assert_eq!(breakdown[&ContributionCode::Pio], 37_000);
        assert_eq!(breakdown[&ContributionCode::ChildProtection], 3_400);
    }

    #[test]
    fn test_amount_overflow_is_calculation_error() {
        assert_eq!(add_amounts(1, 2).unwrap(), 3);
        assert_eq!(sub_amounts(1, 2).unwrap(), -1);
        assert!(matches!(
            add_amounts(i64::MAX, 1),
            Err(EngineError::CalculationError { .. })
        ));
        assert!(matches!(
            sub_amounts(i64::MIN, 1),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_contribution_total_overflow_is_calculation_error() {
        let mut breakdown = ContributionsBreakdown::new();
        let result = add_contributions(
            &mut breakdown,
            i64::MAX,
            &[(ContributionCode::Pio, 6_000), (ContributionCode::Health, 6_000)],
        );
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_rate_sheet_tracks_applied_versions() {
        let rules = example_rules();
        let mut sheet = RateSheet::new(&rules, date(2025, 8, 1));

        assert_eq!(sheet.rate(Jurisdiction::Fbih, RuleCode::PioOn).unwrap(), 250);
        assert_eq!(sheet.rate(Jurisdiction::Fbih, RuleCode::IncomeTax).unwrap(), 1_000);

        let applied = sheet.into_applied();
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].code, "PIO_ON");
        assert_eq!(applied[0].valid_from, date(2025, 7, 1));
    }
}
