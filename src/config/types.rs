//! Configuration types for the salary normalizer.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Currency, EmploymentPeriod};

/// Default number of days searched on each side of a date with no quote.
pub const DEFAULT_FALLBACK_WINDOW_DAYS: u32 = 99;

/// A hand-maintained rate for a currency whose official quotes stopped.
///
/// From `effective_from` onward, when the rate source has no quote for a
/// pair involving `currency`, the converter bridges through `reference`
/// using this fixed rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionalRate {
    /// The currency whose official quotes are missing.
    pub currency: Currency,
    /// The currency the conventional rate is quoted against.
    pub reference: Currency,
    /// Units of `currency` per one unit of `reference`.
    pub rate: Decimal,
    /// First date the conventional rate applies to.
    pub effective_from: NaiveDate,
}

/// Settings for the currency converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Maximum distance in days for the neighbouring-date search.
    pub fallback_window_days: u32,
    /// Conventional rates for discontinued quotes.
    pub conventional_rates: Vec<ConventionalRate>,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            fallback_window_days: DEFAULT_FALLBACK_WINDOW_DAYS,
            conventional_rates: Vec::new(),
        }
    }
}

/// Currencies reported when a request does not name any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingSettings {
    /// Currencies of the nominal series.
    pub nominal_currencies: Vec<Currency>,
    /// Currencies of the purchasing-power-adjusted series.
    pub purchasing_power_currencies: Vec<Currency>,
}

/// The complete engine configuration loaded from `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Currency conversion settings.
    #[serde(default)]
    pub conversion: ConversionSettings,
    /// Reporting defaults.
    #[serde(default)]
    pub reporting: ReportingSettings,
}

/// Employment history file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsConfig {
    /// The employment periods, in any order.
    pub periods: Vec<EmploymentPeriod>,
}
