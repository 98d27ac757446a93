//! Payroll run and tenant models.
//!
//! This module contains the [`PayrollRun`] type, one monthly pay period for a
//! tenant, and the [`Tenant`] type that carries the jurisdiction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Jurisdiction;
use crate::error::{EngineError, EngineResult};

/// An organization whose employees are paid under one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique identifier for the tenant.
    pub id: String,
    /// Company name.
    pub name: String,
    /// The jurisdiction the tenant is registered in.
    pub jurisdiction: Jurisdiction,
}

/// A monthly pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollRun;
/// use chrono::NaiveDate;
///
/// let run = PayrollRun {
///     id: "run_2025_07".to_string(),
///     tenant_id: "tenant_1".to_string(),
///     month: 7,
///     year: 2025,
///     payment_date: None,
/// };
///
/// assert_eq!(
///     run.effective_date().unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: String,
    /// The tenant the run belongs to.
    pub tenant_id: String,
    /// Month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Planned payment date.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

impl PayrollRun {
    /// Returns the first calendar day of the run's month.
    ///
    /// Rule versions for every employee in the run are resolved on this date.
    pub fn effective_date(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            EngineError::invalid_input(
                "month",
                format!("{}-{} is not a valid pay period", self.year, self.month),
            )
        })
    }
}
