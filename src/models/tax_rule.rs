//! Time-versioned tax and contribution rules.
//!
//! A [`TaxRule`] is one version of a rate (or deduction/limit amount) for a
//! jurisdiction, valid over a closed or open-ended date interval. Rates are
//! stored in basis points (1700 = 17.00%); deductions and limits are stored
//! in currency subunits.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Jurisdiction;

/// The informational kind of a rule. Not used for arithmetic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// A social contribution rate.
    Contribution,
    /// An income tax rate.
    Tax,
    /// A monetary limit.
    Limit,
    /// A monetary deduction base.
    Deduction,
}

/// The rule codes the calculators look up.
///
/// Rule stores key rules by free-form strings; this enum names the ones the
/// engine depends on so a typo cannot slip into a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCode {
    /// FBIH pension contribution withheld from salary.
    PioFrom,
    /// FBIH health contribution withheld from salary.
    HealthFrom,
    /// FBIH unemployment contribution withheld from salary.
    UnemploymentFrom,
    /// FBIH pension contribution paid on top of salary.
    PioOn,
    /// FBIH health contribution paid on top of salary.
    HealthOn,
    /// FBIH unemployment contribution paid on top of salary.
    UnemploymentOn,
    /// RS / BD pension contribution.
    Pio,
    /// RS / BD health contribution.
    Health,
    /// RS child protection contribution.
    ChildProtection,
    /// RS / BD unemployment contribution.
    Unemployment,
    /// Flat income tax rate.
    IncomeTax,
    /// Monthly personal deduction base, in subunits.
    PersonalDeduction,
    /// RS seniority increment per year of service.
    SeniorityRate,
}

impl RuleCode {
    /// Returns the code as stored in the rule book.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::PioFrom => "PIO_FROM",
            RuleCode::HealthFrom => "HEALTH_FROM",
            RuleCode::UnemploymentFrom => "UNEMPLOYMENT_FROM",
            RuleCode::PioOn => "PIO_ON",
            RuleCode::HealthOn => "HEALTH_ON",
            RuleCode::UnemploymentOn => "UNEMPLOYMENT_ON",
            RuleCode::Pio => "PIO",
            RuleCode::Health => "HEALTH",
            RuleCode::ChildProtection => "CHILD_PROTECTION",
            RuleCode::Unemployment => "UNEMPLOYMENT",
            RuleCode::IncomeTax => "INCOME_TAX",
            RuleCode::PersonalDeduction => "PERSONAL_DEDUCTION",
            RuleCode::SeniorityRate => "SENIORITY_RATE",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One version of a rule, valid over `[valid_from, valid_to]`.
///
/// A missing `valid_to` means the rule is valid until further notice.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Jurisdiction, RuleType, TaxRule};
/// use chrono::NaiveDate;
///
/// let rule = TaxRule {
///     jurisdiction: Jurisdiction::Fbih,
///     code: "PIO_ON".to_string(),
///     rule_type: RuleType::Contribution,
///     rate_value: 600,
///     description: None,
///     valid_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     valid_to: NaiveDate::from_ymd_opt(2025, 6, 30),
/// };
///
/// assert!(rule.is_valid_on(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
/// assert!(!rule.is_valid_on(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// The jurisdiction this rule belongs to.
    pub jurisdiction: Jurisdiction,
    /// The rule code, e.g. "PIO_FROM".
    pub code: String,
    /// The informational rule type.
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Basis points for rates, subunits for deductions and limits.
    pub rate_value: i64,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// First day the rule applies (inclusive).
    pub valid_from: NaiveDate,
    /// Last day the rule applies (inclusive), or `None` if open-ended.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl TaxRule {
    /// Returns true if the validity interval contains `date`.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_to.is_none_or(|to| to >= date)
    }
}

/// A record of a rule version used by a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRule {
    /// The jurisdiction the rule was resolved in.
    pub jurisdiction: Jurisdiction,
    /// The rule code.
    pub code: String,
    /// The value that was applied.
    pub rate_value: i64,
    /// The start of the applied version's validity.
    pub valid_from: NaiveDate,
    /// The end of the applied version's validity, if any.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl From<&TaxRule> for AppliedRule {
    fn from(rule: &TaxRule) -> Self {
        AppliedRule {
            jurisdiction: rule.jurisdiction,
            code: rule.code.clone(),
            rate_value: rule.rate_value,
            valid_from: rule.valid_from,
            valid_to: rule.valid_to,
        }
    }
}
