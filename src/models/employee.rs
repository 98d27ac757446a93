//! Employee and contract models.
//!
//! These are read-only snapshots of the records a period run needs: the
//! employee's personal tax factor and the terms of their employment contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DEFAULT_TAX_FACTOR, Money, PensionFundChoice};

/// The legal form of an employment contract. Informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Fixed-term contract (ugovor na odredjeno).
    FixedTerm,
    /// Indefinite contract (ugovor na neodredjeno).
    Indefinite,
}

/// An employee of a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The tenant the employee works for.
    pub tenant_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Personal deduction multiplier as a percentage (100 = 1.0x).
    #[serde(default = "default_tax_factor")]
    pub tax_factor: i64,
    /// Whether the employee is currently employed.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_tax_factor() -> i64 {
    DEFAULT_TAX_FACTOR
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns "first last".
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     tenant_id: "tenant_1".to_string(),
    ///     first_name: "Amra".to_string(),
    ///     last_name: "Hodzic".to_string(),
    ///     tax_factor: 100,
    ///     is_active: true,
    /// };
    /// assert_eq!(employee.display_name(), "Amra Hodzic");
    /// ```
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An employment contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract.
    pub id: String,
    /// The employee this contract belongs to.
    pub employee_id: String,
    /// Fixed-term or indefinite.
    pub contract_type: ContractType,
    /// Agreed monthly gross in subunits.
    pub gross_amount: Money,
    /// First day of the contract.
    pub start_date: NaiveDate,
    /// Last day of a fixed-term contract.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Pension fund choice, needed for BD tenants.
    #[serde(default)]
    pub pension_fund_choice: Option<PensionFundChoice>,
    /// The date seniority (minuli rad) starts accruing at this employer.
    pub tenure_start_date: NaiveDate,
    /// Whole years of service credited from previous employers.
    #[serde(default)]
    pub previous_tenure_years: i64,
    /// Whether this is the employee's current contract.
    #[serde(default = "default_active")]
    pub is_active: bool,
}
