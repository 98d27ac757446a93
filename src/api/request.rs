//! Request types for the payroll engine API.
//!
//! Jurisdictions arrive as free-form strings so an unsupported tag is
//! reported as `UNKNOWN_JURISDICTION` instead of a generic JSON error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::InMemoryDirectory;
use crate::error::EngineError;
use crate::models::{
    CalculationInput, Contract, DEFAULT_TAX_FACTOR, DEFAULT_WORK_DAYS, Employee, Jurisdiction,
    Money, PayrollRun, PensionFundChoice, Tenant,
};

fn default_work_days() -> u32 {
    DEFAULT_WORK_DAYS
}

fn default_tax_factor() -> i64 {
    DEFAULT_TAX_FACTOR
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// "FBIH", "RS" or "BD".
    pub jurisdiction: String,
    /// Gross amount in subunits.
    pub gross_amount: Money,
    /// Work days in the period.
    #[serde(default = "default_work_days")]
    pub work_days: u32,
    /// Seniority in hundredths of a year.
    #[serde(default)]
    pub seniority_hundredths: i64,
    /// Tax factor percentage.
    #[serde(default = "default_tax_factor")]
    pub tax_factor: i64,
    /// The date rules are resolved at.
    pub effective_date: NaiveDate,
    /// Required for BD.
    #[serde(default)]
    pub pension_fund_choice: Option<PensionFundChoice>,
}

impl TryFrom<CalculationRequest> for CalculationInput {
    type Error = EngineError;

    fn try_from(req: CalculationRequest) -> Result<Self, Self::Error> {
        let jurisdiction: Jurisdiction = req.jurisdiction.parse()?;
        Ok(CalculationInput {
            jurisdiction,
            gross_amount: req.gross_amount,
            work_days: req.work_days,
            seniority_hundredths: req.seniority_hundredths,
            tax_factor: req.tax_factor,
            effective_date: req.effective_date,
            pension_fund_choice: req.pension_fund_choice,
        })
    }
}

/// Request body for the `/net-to-gross` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetToGrossRequest {
    /// The desired net in subunits.
    pub target_net: Money,
    /// "FBIH", "RS" or "BD".
    pub jurisdiction: String,
    /// Tax factor percentage.
    #[serde(default = "default_tax_factor")]
    pub tax_factor: i64,
    /// The date rules are resolved at.
    pub effective_date: NaiveDate,
    /// Required for BD.
    #[serde(default)]
    pub pension_fund_choice: Option<PensionFundChoice>,
}

/// Request body for the `/payroll-runs/process` endpoint.
///
/// Carries a snapshot of every record the run reads; the response items are
/// for the caller to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRunRequest {
    /// The run to process.
    pub payroll_run: PayrollRun,
    /// The tenant the run belongs to.
    pub tenant: Tenant,
    /// The tenant's employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Contracts of those employees.
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl From<ProcessRunRequest> for InMemoryDirectory {
    fn from(req: ProcessRunRequest) -> Self {
        InMemoryDirectory {
            tenants: vec![req.tenant],
            payroll_runs: vec![req.payroll_run],
            employees: req.employees,
            contracts: req.contracts,
        }
    }
}
