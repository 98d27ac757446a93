//! The rule lookup contract consumed by the calculators.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Jurisdiction, RuleCode, TaxRule};

use super::types::RuleBook;

/// Resolves the rule version valid on a given date.
///
/// A version matches when `valid_from <= as_of` and `valid_to` is absent or
/// `valid_to >= as_of`. Implementations backed by an external store must
/// return the same answer for the same date as long as the data is unchanged.
pub trait RuleResolver: Send + Sync {
    /// Returns the matching rule version, or `None`.
    fn resolve(&self, jurisdiction: Jurisdiction, code: &str, as_of: NaiveDate) -> Option<TaxRule>;

    /// Resolves a rule a calculation cannot proceed without.
    ///
    /// Returns `MissingRule` instead of falling back to any default rate.
    fn require(
        &self,
        jurisdiction: Jurisdiction,
        code: RuleCode,
        as_of: NaiveDate,
    ) -> EngineResult<TaxRule> {
        self.resolve(jurisdiction, code.as_str(), as_of)
            .ok_or_else(|| EngineError::MissingRule {
                jurisdiction,
                code: code.as_str().to_string(),
                date: as_of,
            })
    }
}

impl RuleResolver for RuleBook {
    fn resolve(&self, jurisdiction: Jurisdiction, code: &str, as_of: NaiveDate) -> Option<TaxRule> {
        let rule = self
            .versions(jurisdiction, code)
            .iter()
            .find(|rule| rule.is_valid_on(as_of))
            .cloned();
        if rule.is_none() {
            debug!(%jurisdiction, code, %as_of, "No rule version matches date");
        }
        rule
    }
}
