//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and employment histories from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::EmploymentPeriod;

use super::types::{
    ConversionSettings, EngineConfig, PeriodsConfig, ReportingSettings,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Conversion and reporting settings
/// └── periods.yaml   # Employment history (loaded separately)
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_normalizer::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Fallback window: {} days", loader.conversion().fallback_window_days);
///
/// let periods = ConfigLoader::load_periods("./config/default/periods.yaml")?;
/// println!("{} employment periods", periods.len());
/// # Ok::<(), salary_normalizer::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` is missing (`ConfigNotFound`)
    /// - it contains invalid YAML or unknown currencies (`ConfigParseError`)
    /// - a setting is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let engine_path = path.as_ref().join("engine.yaml");
        let config = Self::load_yaml::<EngineConfig>(&engine_path)?;
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads an employment history file.
    ///
    /// Every period is validated as it is read; a period whose begin date is
    /// after its end date fails the whole file with `ConfigParseError`.
    pub fn load_periods<P: AsRef<Path>>(path: P) -> EngineResult<Vec<EmploymentPeriod>> {
        Self::load_yaml::<PeriodsConfig>(path.as_ref()).map(|file| file.periods)
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

    fn validate(config: &EngineConfig) -> EngineResult<()> {
        let conversion = &config.conversion;

        if conversion.fallback_window_days == 0 {
            return Err(EngineError::InvalidConfig {
                message: "fallback_window_days must be positive".to_string(),
            });
        }

        for conventional in &conversion.conventional_rates {
            if conventional.currency == conventional.reference {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "conventional rate for {} cannot reference itself",
                        conventional.currency
                    ),
                });
            }
            if conventional.rate <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "conventional rate for {} must be positive, got {}",
                        conventional.currency, conventional.rate
                    ),
                });
            }
        }

        Ok(())
    }

    /// Returns the currency conversion settings.
    pub fn conversion(&self) -> &ConversionSettings {
        &self.config.conversion
    }

    /// Returns the reporting defaults.
    pub fn reporting(&self) -> &ReportingSettings {
        &self.config.reporting
    }
}
