//! Calculation logic for the payroll engine.
//!
//! This module contains the forward calculators for the three jurisdictions
//! (FBIH, RS and BD), the dispatching engine, the net-to-gross solver,
//! seniority derivation and the pay period batch processor. All amounts are
//! integer subunits; see [`scaled_round`] for the single rounding rule.

mod bd;
mod common;
mod engine;
mod fbih;
mod net_to_gross;
mod period;
mod rounding;
mod rs;
mod seniority;

#[cfg(test)]
pub(crate) mod test_support;

pub use bd::{calculate_bd, pension_rule};
pub use engine::calculate_payroll;
pub use fbih::calculate_fbih;
pub use net_to_gross::{NetToGrossSolution, solve_gross_for_net};
pub use period::{
    InMemoryDirectory, PayrollDirectory, PeriodRunOutcome, SkipReason, SkippedEmployee,
    process_period,
};
pub use rounding::{
    PERCENT_SCALE, RATE_SCALE, SENIORITY_SCALE, apply_percent, apply_rate, scaled_round,
};
pub use rs::calculate_rs;
pub use seniority::{DAYS_PER_SERVICE_YEAR, seniority_hundredths};
