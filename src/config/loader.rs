//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and rule books from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Jurisdiction, TaxRule};

use super::resolver::RuleResolver;
use super::types::{EngineSettings, RuleBook, RuleFile};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// answers rule lookups for the calculators.
///
/// # Directory Structure
///
/// ```text
/// config/bih/
/// ├── engine.yaml      # Solver and period run settings
/// └── rules/
///     ├── fbih.yaml    # Rule versions for one jurisdiction
///     ├── rs.yaml
///     └── bd.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::{ConfigLoader, RuleResolver};
/// use payroll_engine::models::Jurisdiction;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/bih").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let rule = loader.resolve(Jurisdiction::Fbih, "PIO_FROM", date).unwrap();
/// println!("PIO_FROM: {} bp", rule.rate_value);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: RuleBook,
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/bih")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` or the `rules` directory is missing
    /// - Any file contains invalid YAML or an unknown jurisdiction
    /// - A rule version ends before it starts
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/bih")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&settings_path)?;

        let rules_dir = path.join("rules");
        let rules = Self::load_rules(&rules_dir)?;

        let book = RuleBook::new(rules);
        for (earlier, later) in book.overlapping_versions() {
            warn!(
                jurisdiction = %earlier.jurisdiction,
                code = %earlier.code,
                first_from = %earlier.valid_from,
                second_from = %later.valid_from,
                "Overlapping rule versions; lookups return the earlier version"
            );
        }

        info!(
            path = %path.display(),
            rule_count = book.len(),
            "Loaded payroll configuration"
        );

        Ok(Self::from_parts(book, settings))
    }

    /// Creates a loader from an already-built rule book and settings.
    pub fn from_parts(rules: RuleBook, settings: EngineSettings) -> Self {
        Self { rules, settings }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rule files from the rules directory.
    fn load_rules(rules_dir: &Path) -> EngineResult<Vec<TaxRule>> {
        let rules_dir_str = rules_dir.display().to_string();

        let entries = fs::read_dir(rules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rules_dir_str.clone(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rules_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", rules_dir_str),
            });
        }

        let mut rules = Vec::new();
        for path in &paths {
            let file = Self::load_yaml::<RuleFile>(path)?;
            for rule in file.into_rules() {
                if rule.valid_to.is_some_and(|to| to < rule.valid_from) {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "rule '{}' ends ({:?}) before it starts ({})",
                            rule.code, rule.valid_to, rule.valid_from
                        ),
                    });
                }
                rules.push(rule);
            }
        }

        Ok(rules)
    }

    /// Returns the rule book.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns every rule of a jurisdiction, newest first.
    pub fn rules_for(&self, jurisdiction: Jurisdiction) -> Vec<&TaxRule> {
        self.rules.rules_for(jurisdiction)
    }
}

impl RuleResolver for ConfigLoader {
    fn resolve(&self, jurisdiction: Jurisdiction, code: &str, as_of: NaiveDate) -> Option<TaxRule> {
        self.rules.resolve(jurisdiction, code, as_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use crate::models::RuleType;

    fn config_path() -> &'static str {
        "./config/bih"
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert!(!loader.rules().is_empty());
        assert_eq!(loader.settings().solver.tolerance, 10);
        assert_eq!(loader.settings().solver.max_iterations, 50);
        assert_eq!(loader.settings().batch.work_days, 22);
        assert_eq!(loader.settings().batch.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_resolve_fbih_income_tax() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rule = loader
            .resolve(Jurisdiction::Fbih, "INCOME_TAX", date(2024, 1, 1))
            .unwrap();
        assert_eq!(rule.rate_value, 1000);
        assert_eq!(rule.rule_type, RuleType::Tax);
    }

    #[test]
    fn test_resolve_fbih_reform_versions() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let before = loader
            .resolve(Jurisdiction::Fbih, "PIO_ON", date(2025, 6, 1))
            .unwrap();
        let after = loader
            .resolve(Jurisdiction::Fbih, "PIO_ON", date(2025, 8, 1))
            .unwrap();

        assert_eq!(before.rate_value, 600);
        assert_eq!(after.rate_value, 250);
    }

    #[test]
    fn test_resolve_rs_seniority_rate() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rule = loader
            .resolve(Jurisdiction::Rs, "SENIORITY_RATE", date(2024, 1, 1))
            .unwrap();
        assert_eq!(rule.rate_value, 30);
    }

    #[test]
    fn test_example_rule_data_has_no_overlaps() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.rules().overlapping_versions().is_empty());
    }

    #[test]
    fn test_rules_for_lists_only_one_jurisdiction() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rules = loader.rules_for(Jurisdiction::Bd);
        assert!(!rules.is_empty());
        assert!(rules.iter().all(|r| r.jurisdiction == Jurisdiction::Bd));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_rule_before_first_version_is_missing() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(
            loader
                .resolve(Jurisdiction::Fbih, "PIO_FROM", date(2019, 12, 31))
                .is_none()
        );
    }
}
