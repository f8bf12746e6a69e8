//! Read-only data sources consumed by the calculation layer.
//!
//! Exchange rates and purchasing-power coefficients are loaded by the caller
//! and injected into the converters; nothing here holds global state.

mod coefficient_table;
mod rate_table;

pub use coefficient_table::{CoefficientFetcher, CoefficientTable};
pub use rate_table::{ExchangeRateSource, RateTable};
