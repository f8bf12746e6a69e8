//! Calculation logic for the salary normalizer.
//!
//! This module contains month sequencing over date ranges, currency
//! conversion with fallback for missing rates, purchasing-power
//! compounding, the salary calculator that orchestrates them, and yearly
//! summaries of its output.

mod currency_converter;
mod month_sequence;
mod purchasing_power;
mod salary_calculator;
mod yearly_stats;

pub use currency_converter::{CurrencyConverter, RateOrigin, RateQuote};
pub use month_sequence::MonthSequence;
pub use purchasing_power::{
    PurchasingPowerConverter, PurchasingPowerRegistry, cumulative_coefficients,
};
pub use salary_calculator::SalaryCalculator;
pub use yearly_stats::{YearOverYear, YearlyStats, year_over_year, yearly_stats};
