//! Historical exchange-rate tables.
//!
//! This module provides the [`ExchangeRateSource`] trait consumed by the
//! currency converter, and [`RateTable`], an in-memory implementation that
//! can be loaded from the ECB `eurofxref-hist.csv` layout.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::Currency;

/// A read-only source of historical exchange rates.
///
/// Implementations answer for a single date only. A `None` answer is
/// expected (weekends, holidays, discontinued quotes); the converter runs
/// its own fallback search on top.
pub trait ExchangeRateSource: Send + Sync {
    /// Units of `to` per one unit of `from` on `date`.
    fn rate(&self, date: NaiveDate, from: Currency, to: Currency) -> Option<Decimal>;
}

/// Daily quotes of many currencies against one base currency.
///
/// Cross rates are derived through the base: `rate(d, a, b)` is
/// `quote(d, b) / quote(d, a)`, where the base itself always quotes at 1.
///
/// # Example
///
/// ```
/// use salary_normalizer::data::{ExchangeRateSource, RateTable};
/// use salary_normalizer::models::Currency;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let csv = "Date,USD,JPY,\n2020-03-02,1.1126,119.77,\n";
/// let table = RateTable::from_ecb_csv(csv.as_bytes()).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
/// assert_eq!(
///     table.rate(date, Currency::Eur, Currency::Usd),
///     Some(Decimal::new(11126, 4))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RateTable {
    base: Currency,
    quotes: BTreeMap<NaiveDate, HashMap<Currency, Decimal>>,
}

impl RateTable {
    /// Creates an empty table quoted against `base`.
    pub fn new(base: Currency) -> Self {
        Self {
            base,
            quotes: BTreeMap::new(),
        }
    }

    /// Records that one unit of the base buys `units_per_base` of `currency` on `date`.
    pub fn insert(&mut self, date: NaiveDate, currency: Currency, units_per_base: Decimal) {
        self.quotes
            .entry(date)
            .or_default()
            .insert(currency, units_per_base);
    }

    /// Parses the ECB historical reference rate CSV.
    ///
    /// The first column holds ISO dates; every other column is headed by a
    /// currency code and holds units of that currency per euro. `N/A` and
    /// empty cells are skipped, as are columns for currencies the engine does
    /// not support.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RateTableParse`] on unreadable records,
    /// malformed dates, and malformed or non-positive rates.
    pub fn from_ecb_csv<R: Read>(reader: R) -> EngineResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let columns: Vec<Option<Currency>> = headers
            .iter()
            .skip(1)
            .map(|code| {
                let currency = code.parse::<Currency>().ok();
                if currency.is_none() && !code.is_empty() {
                    debug!(code = %code, "Skipping unsupported currency column");
                }
                currency
            })
            .collect();

        let mut table = Self::new(Currency::Eur);

        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, |p| p.line());

            let Some(raw_date) = record.get(0) else {
                continue;
            };
            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
                EngineError::RateTableParse {
                    line,
                    message: format!("invalid date '{}'", raw_date),
                }
            })?;

            for (cell, currency) in record.iter().skip(1).zip(&columns) {
                let Some(currency) = currency else {
                    continue;
                };
                if cell.is_empty() || cell.eq_ignore_ascii_case("N/A") {
                    continue;
                }
                let rate = Decimal::from_str(cell)
                    .ok()
                    .filter(|r| r.is_sign_positive() && !r.is_zero())
                    .ok_or_else(|| EngineError::RateTableParse {
                        line,
                        message: format!("invalid {} rate '{}'", currency, cell),
                    })?;
                table.insert(date, *currency, rate);
            }
        }

        debug!(dates = table.len(), "Loaded exchange rate table");
        Ok(table)
    }

    /// The currency every quote is expressed against.
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Number of quoted dates.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if the table holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// First and last quoted dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.quotes.keys().next()?;
        let last = self.quotes.keys().next_back()?;
        Some((*first, *last))
    }

    fn units_per_base(&self, date: NaiveDate, currency: Currency) -> Option<Decimal> {
        if currency == self.base {
            return Some(Decimal::ONE);
        }
        self.quotes.get(&date)?.get(&currency).copied()
    }
}

impl ExchangeRateSource for RateTable {
    fn rate(&self, date: NaiveDate, from: Currency, to: Currency) -> Option<Decimal> {
        let from_units = self.units_per_base(date, from)?;
        let to_units = self.units_per_base(date, to)?;
        to_units.checked_div(from_units)
    }
}

fn csv_error(err: csv::Error) -> EngineError {
    EngineError::RateTableParse {
        line: err.position().map_or(0, |p| p.line()),
        message: err.to_string(),
    }
}
