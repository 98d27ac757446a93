//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_input;
mod calculation_result;
mod employee;
mod jurisdiction;
mod pay_period;
mod payroll_item;
mod tax_rule;

pub use calculation_input::{CalculationInput, DEFAULT_TAX_FACTOR, DEFAULT_WORK_DAYS};
pub use calculation_result::{
    AllowanceCode, AllowancesBreakdown, CalculationResult, ContributionCode,
    ContributionsBreakdown,
};
pub use employee::{Contract, ContractType, Employee};
pub use jurisdiction::{Jurisdiction, PensionFundChoice};
pub use pay_period::{PayrollRun, Tenant};
pub use payroll_item::{EmployeeSummary, PayrollItem};
pub use tax_rule::{AppliedRule, RuleCode, RuleType, TaxRule};

/// A monetary amount in the smallest currency subunit (fening).
pub type Money = i64;
