//! Calculation result models for the payroll engine.
//!
//! This module contains the [`CalculationResult`] type and the closed sets of
//! component codes used to itemize contributions and allowances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AppliedRule, Money};

/// A contribution component in a result breakdown.
///
/// The set of keys present depends on the jurisdiction:
/// FBIH uses the six `*From`/`*On` codes, RS uses `Pio`, `Health`,
/// `ChildProtection`, `Unemployment` and `Seniority`, and BD uses `Pio`,
/// `Health` and `Unemployment`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ContributionCode;
///
/// let json = serde_json::to_string(&ContributionCode::PioFrom).unwrap();
/// assert_eq!(json, "\"PIO_FROM\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionCode {
    /// FBIH pension, from salary.
    PioFrom,
    /// FBIH health, from salary.
    HealthFrom,
    /// FBIH unemployment, from salary.
    UnemploymentFrom,
    /// FBIH pension, on salary.
    PioOn,
    /// FBIH health, on salary.
    HealthOn,
    /// FBIH unemployment, on salary.
    UnemploymentOn,
    /// Pension (RS, BD).
    Pio,
    /// Health (RS, BD).
    Health,
    /// Child protection (RS).
    ChildProtection,
    /// Unemployment (RS, BD).
    Unemployment,
    /// Seniority increment folded into gross (RS).
    Seniority,
}

/// A non-contribution addition to pay. Reserved; no calculator emits these yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllowanceCode {
    /// Meal allowance.
    Meal,
    /// Transport allowance.
    Transport,
}

/// Contribution amounts keyed by component.
pub type ContributionsBreakdown = BTreeMap<ContributionCode, Money>;

/// Allowance amounts keyed by component.
pub type AllowancesBreakdown = BTreeMap<AllowanceCode, Money>;

/// The complete result of a forward payroll calculation.
///
/// All amounts are in currency subunits.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CalculationResult, ContributionCode};
/// use std::collections::BTreeMap;
///
/// let result = CalculationResult {
///     calculated_gross: 100_000,
///     contributions_from: 31_000,
///     contributions_on: 0,
///     taxable_base: 60_667,
///     tax_amount: 4_853,
///     net_amount: 64_147,
///     total_cost: 100_000,
///     contributions_breakdown: BTreeMap::from([(ContributionCode::Pio, 18_500)]),
///     allowances_breakdown: BTreeMap::new(),
///     applied_rules: vec![],
/// };
/// assert_eq!(result.breakdown_amount(ContributionCode::Pio), Some(18_500));
/// assert_eq!(result.breakdown_amount(ContributionCode::PioOn), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Gross after any seniority increment.
    pub calculated_gross: Money,
    /// Total contributions withheld from the employee.
    pub contributions_from: Money,
    /// Total employer contributions on top of gross.
    pub contributions_on: Money,
    /// Income subject to tax, floored at zero.
    pub taxable_base: Money,
    /// Income tax withheld.
    pub tax_amount: Money,
    /// Pay after contributions and tax.
    pub net_amount: Money,
    /// Total cost to the employer.
    pub total_cost: Money,
    /// Individual contribution amounts.
    pub contributions_breakdown: ContributionsBreakdown,
    /// Individual allowance amounts.
    pub allowances_breakdown: AllowancesBreakdown,
    /// The rule versions the calculation used.
    #[serde(default)]
    pub applied_rules: Vec<AppliedRule>,
}

impl CalculationResult {
    /// Returns the amount of one breakdown component, if present.
    pub fn breakdown_amount(&self, code: ContributionCode) -> Option<Money> {
        self.contributions_breakdown.get(&code).copied()
    }

    /// Returns the applied value of a rule code, if the calculation used it.
    pub fn applied_rate(&self, code: &str) -> Option<i64> {
        self.applied_rules
            .iter()
            .find(|rule| rule.code == code)
            .map(|rule| rule.rate_value)
    }
}
