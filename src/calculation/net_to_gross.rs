//! Net-to-gross inverse calculation.
//!
//! Net pay is monotonic but not invertible in closed form (rounding, the
//! zero floor on the taxable base), so the gross is found by integer
//! bisection over the forward engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::engine::calculate_payroll;
use crate::config::{RuleResolver, SolverSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationInput, Jurisdiction, Money, PensionFundChoice};

/// The outcome of a net-to-gross solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetToGrossSolution {
    /// The gross amount found.
    pub gross_amount: Money,
    /// The net the forward engine yields for `gross_amount`.
    pub net_amount: Money,
    /// Forward calculations spent searching.
    pub iterations: u32,
    /// False when the iteration cap was hit before reaching tolerance.
    pub converged: bool,
}

/// Finds the gross amount whose forward calculation yields `target_net`.
///
/// Searches `[target_net, 2 x target_net]`, trial-calculating each midpoint
/// with 22 work days and no seniority. A midpoint whose net is within
/// `settings.tolerance` of the target is returned immediately. When
/// `settings.max_iterations` is exhausted the midpoint of the remaining
/// interval is returned with `converged = false`. That midpoint is not one of
/// the search trials, so one more forward calculation fills in its
/// `net_amount`; `iterations` still reports the search trials only.
///
/// # Errors
///
/// - `InvalidInput` for a negative target or tax factor
/// - any error of the forward calculation (`MissingRule`,
///   `MissingPensionChoice`)
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::solve_gross_for_net;
/// use payroll_engine::config::{ConfigLoader, SolverSettings};
/// use payroll_engine::models::Jurisdiction;
/// use chrono::NaiveDate;
///
/// let config = ConfigLoader::load("./config/bih").unwrap();
/// let solution = solve_gross_for_net(
///     100_000,
///     Jurisdiction::Fbih,
///     100,
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     None,
///     &config,
///     &SolverSettings::default(),
/// )
/// .unwrap();
///
/// assert!(solution.converged);
/// assert!((solution.net_amount - 100_000).abs() <= 10);
/// ```
pub fn solve_gross_for_net<R: RuleResolver + ?Sized>(
    target_net: Money,
    jurisdiction: Jurisdiction,
    tax_factor: i64,
    effective_date: NaiveDate,
    pension_choice: Option<PensionFundChoice>,
    rules: &R,
    settings: &SolverSettings,
) -> EngineResult<NetToGrossSolution> {
    if target_net < 0 {
        return Err(EngineError::invalid_input(
            "target_net",
            format!("must not be negative, got {}", target_net),
        ));
    }

    let trial = |gross: Money| -> EngineResult<Money> {
        let mut input = CalculationInput::new(jurisdiction, gross, effective_date)
            .with_tax_factor(tax_factor);
        input.pension_fund_choice = pension_choice;
        Ok(calculate_payroll(&input, rules)?.net_amount)
    };

    let mut low = target_net;
    let mut high = target_net
        .checked_mul(2)
        .ok_or_else(|| EngineError::invalid_input("target_net", "too large to search"))?;

    for iteration in 1..=settings.max_iterations {
        let mid = midpoint(low, high);
        let net = trial(mid)?;
        let diff = net - target_net;

        debug!(iteration, low, high, mid, net, "Net-to-gross trial");

        if diff.abs() <= settings.tolerance {
            return Ok(NetToGrossSolution {
                gross_amount: mid,
                net_amount: net,
                iterations: iteration,
                converged: true,
            });
        }

        if diff > 0 {
            high = mid - 1;
        } else {
            low = mid + 1;
        }
    }

    let gross_amount = midpoint(low, high);
    let net_amount = trial(gross_amount)?;
    warn!(
        %jurisdiction,
        target_net,
        gross_amount,
        net_amount,
        max_iterations = settings.max_iterations,
        "Net-to-gross did not converge; returning approximate gross"
    );

    Ok(NetToGrossSolution {
        gross_amount,
        net_amount,
        iterations: settings.max_iterations,
        converged: false,
    })
}

/// `round((low + high) / 2)` with halves rounded up, without overflow.
fn midpoint(low: Money, high: Money) -> Money {
    let sum = i128::from(low) + i128::from(high);
    // Both bounds stay within [target, 2 x target], so the midpoint fits.
    (sum.div_euclid(2) + sum.rem_euclid(2)) as Money
}
