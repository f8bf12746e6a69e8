//! Configuration loading and management for the salary normalizer.
//!
//! This module loads engine settings (fallback window, conventional rates,
//! reporting defaults) and employment histories from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_normalizer::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Conventional rates: {}", config.conversion().conventional_rates.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ConventionalRate, ConversionSettings, DEFAULT_FALLBACK_WINDOW_DAYS, EngineConfig,
    PeriodsConfig, ReportingSettings,
};
