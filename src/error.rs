//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can abort a calculation, a net-to-gross solve
//! or a period run.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Jurisdiction;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::UnknownJurisdiction {
///     code: "HR".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown jurisdiction: HR");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A jurisdiction tag outside FBIH, RS and BD.
    #[error("Unknown jurisdiction: {code}")]
    UnknownJurisdiction {
        /// The tag that could not be parsed.
        code: String,
    },

    /// A rule required by a calculation has no version valid on the date.
    #[error("Missing rule '{code}' for jurisdiction {jurisdiction} on date {date}")]
    MissingRule {
        /// The jurisdiction the rule was looked up in.
        jurisdiction: Jurisdiction,
        /// The rule code that failed to resolve.
        code: String,
        /// The effective date of the lookup.
        date: NaiveDate,
    },

    /// A Brcko District calculation was requested without a pension fund.
    #[error("Pension fund choice is required for BD jurisdiction")]
    MissingPensionChoice,

    /// The payroll run (pay period) does not exist.
    #[error("Payroll run not found: {run_id}")]
    PeriodNotFound {
        /// The identifier of the missing payroll run.
        run_id: String,
    },

    /// The tenant (organization) does not exist.
    #[error("Organization not found: {tenant_id}")]
    OrganizationNotFound {
        /// The identifier of the missing tenant.
        tenant_id: String,
    },

    /// An input value was outside its valid domain.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
