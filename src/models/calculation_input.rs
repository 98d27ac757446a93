//! Input to a single forward payroll calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Jurisdiction, Money, PensionFundChoice};
use crate::error::{EngineError, EngineResult};

/// Work days in a standard month. Informational only.
pub const DEFAULT_WORK_DAYS: u32 = 22;

/// Tax factor of 1.0x, expressed as a percentage.
pub const DEFAULT_TAX_FACTOR: i64 = 100;

/// Everything a jurisdiction calculator needs for one employee and month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CalculationInput, Jurisdiction, PensionFundChoice};
/// use chrono::NaiveDate;
///
/// let input = CalculationInput::new(
///     Jurisdiction::Bd,
///     200_000,
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// )
/// .with_tax_factor(150)
/// .with_pension_fund(PensionFundChoice::FbihFund);
///
/// assert_eq!(input.work_days, 22);
/// assert_eq!(input.seniority_hundredths, 0);
/// assert_eq!(input.tax_factor, 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// The jurisdiction whose rules apply.
    pub jurisdiction: Jurisdiction,
    /// Gross amount in subunits. For RS this is the base before seniority.
    pub gross_amount: Money,
    /// Work days in the period. Passed through, not used in the formulas.
    pub work_days: u32,
    /// Years of service in hundredths (250 = 2.5 years).
    pub seniority_hundredths: i64,
    /// Personal deduction multiplier as a percentage (100 = 1.0x).
    pub tax_factor: i64,
    /// The date used to resolve rule versions.
    pub effective_date: NaiveDate,
    /// The pension fund for BD employees.
    #[serde(default)]
    pub pension_fund_choice: Option<PensionFundChoice>,
}

impl CalculationInput {
    /// Creates an input with 22 work days, no seniority and a 1.0x tax factor.
    pub fn new(jurisdiction: Jurisdiction, gross_amount: Money, effective_date: NaiveDate) -> Self {
        Self {
            jurisdiction,
            gross_amount,
            work_days: DEFAULT_WORK_DAYS,
            seniority_hundredths: 0,
            tax_factor: DEFAULT_TAX_FACTOR,
            effective_date,
            pension_fund_choice: None,
        }
    }

    /// Sets the seniority in hundredths of a year.
    pub fn with_seniority(mut self, seniority_hundredths: i64) -> Self {
        self.seniority_hundredths = seniority_hundredths;
        self
    }

    /// Sets the tax factor percentage.
    pub fn with_tax_factor(mut self, tax_factor: i64) -> Self {
        self.tax_factor = tax_factor;
        self
    }

    /// Sets the number of work days.
    pub fn with_work_days(mut self, work_days: u32) -> Self {
        self.work_days = work_days;
        self
    }

    /// Sets the pension fund choice.
    pub fn with_pension_fund(mut self, choice: PensionFundChoice) -> Self {
        self.pension_fund_choice = Some(choice);
        self
    }

    /// Rejects negative amounts and factors.
    pub fn validate(&self) -> EngineResult<()> {
        if self.gross_amount < 0 {
            return Err(EngineError::invalid_input(
                "gross_amount",
                format!("must not be negative, got {}", self.gross_amount),
            ));
        }
        if self.tax_factor < 0 {
            return Err(EngineError::invalid_input(
                "tax_factor",
                format!("must not be negative, got {}", self.tax_factor),
            ));
        }
        if self.seniority_hundredths < 0 {
            return Err(EngineError::invalid_input(
                "seniority_hundredths",
                format!("must not be negative, got {}", self.seniority_hundredths),
            ));
        }
        Ok(())
    }
}
