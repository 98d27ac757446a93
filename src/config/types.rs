//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the [`RuleBook`] that
//! indexes the loaded rule versions.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Jurisdiction, Money, RuleType, TaxRule};

/// One rule version as written in a rule file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    /// The rule code (e.g., "PIO_FROM").
    pub code: String,
    /// The informational rule type.
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Basis points for rates, subunits for deductions and limits.
    pub rate: i64,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// First day of validity.
    pub valid_from: NaiveDate,
    /// Last day of validity, absent for open-ended rules.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

/// A rule file: every rule version of one jurisdiction.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleFile {
    /// The jurisdiction all entries belong to.
    pub jurisdiction: Jurisdiction,
    /// The rule versions.
    pub rules: Vec<RuleEntry>,
}

impl RuleFile {
    /// Converts the entries into [`TaxRule`]s.
    pub fn into_rules(self) -> Vec<TaxRule> {
        let jurisdiction = self.jurisdiction;
        self.rules
            .into_iter()
            .map(|entry| TaxRule {
                jurisdiction,
                code: entry.code,
                rule_type: entry.rule_type,
                rate_value: entry.rate,
                description: entry.description,
                valid_from: entry.valid_from,
                valid_to: entry.valid_to,
            })
            .collect()
    }
}

/// Net-to-gross solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Accepted absolute difference between trial net and target, in subunits.
    #[serde(default = "default_tolerance")]
    pub tolerance: Money,
    /// Bisection iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> Money {
    10
}

fn default_max_iterations() -> u32 {
    50
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// What a period run does when one employee's calculation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole run with the employee's error.
    #[default]
    Abort,
    /// Record the failure and continue with the next employee.
    Skip,
}

/// Period run settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Work days recorded on every payroll item.
    #[serde(default = "default_work_days")]
    pub work_days: u32,
    /// Behaviour on a per-employee calculation error.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_work_days() -> u32 {
    crate::models::DEFAULT_WORK_DAYS
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            work_days: default_work_days(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Engine settings from engine.yaml.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Solver settings.
    #[serde(default)]
    pub solver: SolverSettings,
    /// Period run settings.
    #[serde(default)]
    pub batch: BatchSettings,
}

/// All loaded rule versions, indexed by jurisdiction and code.
///
/// Versions of one code are kept sorted by `valid_from`, so a lookup that
/// matches overlapping versions deterministically returns the earliest.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    rules: HashMap<(Jurisdiction, String), Vec<TaxRule>>,
}

impl RuleBook {
    /// Creates a rule book from rule versions in any order.
    pub fn new(rules: Vec<TaxRule>) -> Self {
        let mut indexed: HashMap<(Jurisdiction, String), Vec<TaxRule>> = HashMap::new();
        for rule in rules {
            indexed
                .entry((rule.jurisdiction, rule.code.clone()))
                .or_default()
                .push(rule);
        }
        for versions in indexed.values_mut() {
            versions.sort_by_key(|rule| rule.valid_from);
        }
        Self { rules: indexed }
    }

    /// Returns the versions of one rule code, oldest first.
    pub fn versions(&self, jurisdiction: Jurisdiction, code: &str) -> &[TaxRule] {
        self.rules
            .get(&(jurisdiction, code.to_string()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns every rule of a jurisdiction, newest first, then by code.
    pub fn rules_for(&self, jurisdiction: Jurisdiction) -> Vec<&TaxRule> {
        let mut rules: Vec<&TaxRule> = self
            .rules
            .iter()
            .filter(|((j, _), _)| *j == jurisdiction)
            .flat_map(|(_, versions)| versions.iter())
            .collect();
        rules.sort_by(|a, b| {
            b.valid_from
                .cmp(&a.valid_from)
                .then_with(|| a.code.cmp(&b.code))
        });
        rules
    }

    /// Returns pairs of versions of the same code whose intervals overlap.
    pub fn overlapping_versions(&self) -> Vec<(&TaxRule, &TaxRule)> {
        let mut overlaps = Vec::new();
        for versions in self.rules.values() {
            for pair in versions.windows(2) {
                let (earlier, later) = (&pair[0], &pair[1]);
                if earlier.valid_to.is_none_or(|to| to >= later.valid_from) {
                    overlaps.push((earlier, later));
                }
            }
        }
        overlaps
    }

    /// Returns the total number of rule versions.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Returns true if no rules are loaded.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
