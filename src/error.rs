//! Error types for the salary normalizer.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Missing exchange rates and exhausted purchasing-power data are *not*
//! errors: they surface as [`Amount::Unavailable`](crate::models::Amount)
//! values. The variants here cover configuration, input validation and
//! failures reported by external data collaborators.

use thiserror::Error;

/// The main error type for the salary normalizer.
///
/// # Example
///
/// ```
/// use salary_normalizer::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
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

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the offending setting.
        message: String,
    },

    /// A currency code outside the supported ISO 4217 set.
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency {
        /// The code that was not recognised.
        code: String,
    },

    /// An employment period was invalid or contained inconsistent data.
    #[error("Invalid employment period '{employer}': {message}")]
    InvalidPeriod {
        /// The employer label of the invalid period.
        employer: String,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A bulk exchange-rate table could not be read.
    #[error("Failed to parse exchange rate table at line {line}: {message}")]
    RateTableParse {
        /// The 1-based line of the offending record.
        line: u64,
        /// A description of the parse error.
        message: String,
    },

    /// An external data provider failed while fetching rate or coefficient data.
    #[error("Data source failure: {message}")]
    DataSource {
        /// A description of the provider failure.
        message: String,
    },

    /// The local coefficient cache could not be written.
    #[error("Failed to write cache '{path}': {message}")]
    CacheWrite {
        /// The cache file path.
        path: String,
        /// A description of the write error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_unsupported_currency_displays_code() {
        let error = EngineError::UnsupportedCurrency {
            code: "XYZ".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported currency: XYZ");
    }

    #[test]
    fn test_invalid_period_displays_employer_and_message() {
        let error = EngineError::InvalidPeriod {
            employer: "Acme".to_string(),
            message: "begin 2020-02-01 is after end 2020-01-01".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employment period 'Acme': begin 2020-02-01 is after end 2020-01-01"
        );
    }

    #[test]
    fn test_rate_table_parse_displays_line() {
        let error = EngineError::RateTableParse {
            line: 3,
            message: "invalid date 'yesterday'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse exchange rate table at line 3: invalid date 'yesterday'"
        );
    }

    #[test]
    fn test_data_source_displays_message() {
        let error = EngineError::DataSource {
            message: "connection reset".to_string(),
        };
        assert_eq!(error.to_string(), "Data source failure: connection reset");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unsupported() -> EngineResult<()> {
            Err(EngineError::UnsupportedCurrency {
                code: "XYZ".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unsupported()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
