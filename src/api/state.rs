//! Application state for the salary normalizer API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::SalaryCalculator;
use crate::config::ReportingSettings;

/// Shared application state.
///
/// Holds the calculator, with its already-loaded rate and coefficient
/// sources, and the reporting defaults used when a request names no
/// currencies.
#[derive(Clone)]
pub struct AppState {
    calculator: Arc<SalaryCalculator>,
    reporting: Arc<ReportingSettings>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(calculator: SalaryCalculator, reporting: ReportingSettings) -> Self {
        Self {
            calculator: Arc::new(calculator),
            reporting: Arc::new(reporting),
        }
    }

    /// Returns the salary calculator.
    pub fn calculator(&self) -> &SalaryCalculator {
        &self.calculator
    }

    /// Returns the reporting defaults.
    pub fn reporting(&self) -> &ReportingSettings {
        &self.reporting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }
}
