//! Per-employee output records of a period run.

use serde::{Deserialize, Serialize};

use super::{AllowancesBreakdown, CalculationResult, ContributionsBreakdown, Money};

/// One calculated payroll line, ready for the caller to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollItem {
    /// The run this item belongs to.
    pub payroll_run_id: String,
    /// The employee paid.
    pub employee_id: String,
    /// The contract the gross was taken from.
    pub contract_id: String,
    /// Contract gross before any seniority increment.
    pub input_gross: Money,
    /// Work days recorded for the period.
    pub work_days: u32,
    /// Seniority used, in hundredths of a year.
    pub seniority_hundredths: i64,
    /// Gross after seniority.
    pub calculated_gross: Money,
    /// Contributions withheld from salary.
    pub contributions_from: Money,
    /// Employer contributions on salary.
    pub contributions_on: Money,
    /// Taxable base.
    pub taxable_base: Money,
    /// Income tax.
    pub tax_amount: Money,
    /// Net pay.
    pub net_amount: Money,
    /// Employer cost.
    pub total_cost: Money,
    /// Itemized contributions.
    pub contributions_breakdown: ContributionsBreakdown,
    /// Itemized allowances.
    pub allowances_breakdown: AllowancesBreakdown,
}

impl PayrollItem {
    /// Builds an item from a calculation result and its identifiers.
    pub fn from_result(
        payroll_run_id: &str,
        employee_id: &str,
        contract_id: &str,
        input_gross: Money,
        work_days: u32,
        seniority_hundredths: i64,
        result: CalculationResult,
    ) -> Self {
        Self {
            payroll_run_id: payroll_run_id.to_string(),
            employee_id: employee_id.to_string(),
            contract_id: contract_id.to_string(),
            input_gross,
            work_days,
            seniority_hundredths,
            calculated_gross: result.calculated_gross,
            contributions_from: result.contributions_from,
            contributions_on: result.contributions_on,
            taxable_base: result.taxable_base,
            tax_amount: result.tax_amount,
            net_amount: result.net_amount,
            total_cost: result.total_cost,
            contributions_breakdown: result.contributions_breakdown,
            allowances_breakdown: result.allowances_breakdown,
        }
    }
}

/// The compact per-employee line returned alongside the full items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The employee paid.
    pub employee_id: String,
    /// "first last".
    pub employee_name: String,
    /// Net pay.
    pub net_amount: Money,
}
