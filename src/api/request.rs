//! Request types for the salary normalizer API.
//!
//! This module defines the JSON request structures for the `/convert` and
//! `/yearly-stats` endpoints. Currency codes arrive as plain strings so that
//! unsupported codes are reported as validation errors rather than as
//! malformed JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Currency, EmploymentPeriod, Salary};

/// Request body for the `/convert` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// The employment history to normalize.
    pub periods: Vec<PeriodRequest>,
    /// Currencies of the nominal series; the configured defaults when absent.
    #[serde(default)]
    pub currencies: Option<Vec<String>>,
    /// Currencies of the adjusted series; the configured defaults when absent.
    #[serde(default)]
    pub purchasing_power_currencies: Option<Vec<String>>,
}

/// Request body for the `/yearly-stats` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyStatsRequest {
    /// The employment history to summarize.
    pub periods: Vec<PeriodRequest>,
    /// Currencies to summarize; the configured nominal defaults when absent.
    #[serde(default)]
    pub currencies: Option<Vec<String>>,
}

/// Employment period information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Label of the employer.
    #[serde(alias = "company")]
    pub employer: String,
    /// First day of employment (inclusive).
    pub begin: NaiveDate,
    /// Last day of employment (inclusive).
    pub end: NaiveDate,
    /// The monthly salary.
    pub salary: SalaryRequest,
}

/// Salary information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// Monthly amount in whole units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl PeriodRequest {
    /// Converts the request into a validated domain period.
    pub fn into_period(self) -> EngineResult<EmploymentPeriod> {
        let currency = self.salary.currency.parse::<Currency>()?;
        EmploymentPeriod::new(
            self.employer,
            self.begin,
            self.end,
            Salary::new(self.salary.amount, currency),
        )
    }
}

/// Converts every period request, failing on the first invalid one.
pub fn parse_periods(periods: Vec<PeriodRequest>) -> EngineResult<Vec<EmploymentPeriod>> {
    periods.into_iter().map(PeriodRequest::into_period).collect()
}

/// Parses requested currency codes, or falls back to `defaults`.
pub fn parse_currencies(
    codes: Option<Vec<String>>,
    defaults: &[Currency],
) -> EngineResult<Vec<Currency>> {
    match codes {
        Some(codes) => codes.iter().map(|code| code.parse()).collect(),
        None => Ok(defaults.to_vec()),
    }
}
