//! Configuration loading and rule resolution for the payroll engine.
//!
//! This module loads engine settings and time-versioned tax rules from YAML
//! files and exposes them through the [`RuleResolver`] contract the
//! calculators depend on.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/bih").unwrap();
//! println!("Loaded {} rule versions", config.rules().len());
//! ```

mod loader;
mod resolver;
mod types;

pub use loader::ConfigLoader;
pub use resolver::RuleResolver;
pub use types::{
    BatchSettings, EngineSettings, FailurePolicy, RuleBook, RuleEntry, RuleFile, SolverSettings,
};
