//! Currency conversion with fallback for sparse rate data.
//!
//! This module provides [`CurrencyConverter`], which converts an amount
//! between currencies as of a date. When the rate source has no quote for
//! the exact date it either applies a configured conventional rate or
//! searches neighbouring days, nearest first.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ConventionalRate, ConversionSettings};
use crate::data::ExchangeRateSource;
use crate::models::{Amount, Currency};

/// Where a quoted rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOrigin {
    /// The source quoted the exact date.
    Exact,
    /// The nearest quoted date, `offset_days` away (positive means later).
    Neighbor {
        /// Signed distance in days from the requested date.
        offset_days: i64,
    },
    /// Bridged through a conventional rate for a discontinued currency.
    Conventional,
}

/// An exchange rate together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuote {
    /// Units of the target currency per one unit of the source currency.
    pub rate: Decimal,
    /// How the rate was obtained.
    pub origin: RateOrigin,
}

/// Converts amounts between currencies using an injected rate source.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use salary_normalizer::calculation::CurrencyConverter;
/// use salary_normalizer::config::ConversionSettings;
/// use salary_normalizer::data::RateTable;
/// use salary_normalizer::models::{Amount, Currency};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut table = RateTable::new(Currency::Eur);
/// let friday = NaiveDate::from_ymd_opt(2020, 3, 6).unwrap();
/// table.insert(friday, Currency::Usd, Decimal::new(11336, 4));
///
/// let converter = CurrencyConverter::new(Arc::new(table), ConversionSettings::default());
///
/// // Saturday has no quote; Friday is one day away.
/// let saturday = NaiveDate::from_ymd_opt(2020, 3, 7).unwrap();
/// assert_eq!(
///     converter.convert(1000, Currency::Eur, Currency::Usd, saturday),
///     Amount::Known(1134)
/// );
/// ```
#[derive(Clone)]
pub struct CurrencyConverter {
    source: Arc<dyn ExchangeRateSource>,
    settings: ConversionSettings,
}

impl CurrencyConverter {
    /// Creates a converter over `source`.
    pub fn new(source: Arc<dyn ExchangeRateSource>, settings: ConversionSettings) -> Self {
        Self { source, settings }
    }

    /// Converts `amount` of `from` into `to` as of `date`, rounded to whole units.
    ///
    /// Returns [`Amount::Unavailable`] when no rate can be found.
    pub fn convert(&self, amount: i64, from: Currency, to: Currency, date: NaiveDate) -> Amount {
        if from == to {
            return Amount::Known(amount);
        }
        match self.quote(from, to, date) {
            Some(quote) => Decimal::from(amount)
                .checked_mul(quote.rate)
                .map_or(Amount::Unavailable, Amount::from_decimal),
            None => {
                debug!(
                    from = %from,
                    to = %to,
                    date = %date,
                    window_days = self.settings.fallback_window_days,
                    "No exchange rate within fallback window"
                );
                Amount::Unavailable
            }
        }
    }

    /// Finds the rate to use for `from` → `to` on `date`.
    ///
    /// Lookup order:
    /// 1. the exact date;
    /// 2. a conventional rate, if one covers the pair and date;
    /// 3. the nearest quoted day within the fallback window, later date
    ///    first on equal distance.
    pub fn quote(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<RateQuote> {
        if from == to {
            return Some(RateQuote {
                rate: Decimal::ONE,
                origin: RateOrigin::Exact,
            });
        }

        if let Some(rate) = self.source.rate(date, from, to) {
            return Some(RateQuote {
                rate,
                origin: RateOrigin::Exact,
            });
        }

        if let Some(conventional) = self.conventional_rate_for(from, to, date) {
            return self.bridge(conventional, from, to, date);
        }

        self.nearest_official(from, to, date)
    }

    fn conventional_rate_for(
        &self,
        from: Currency,
        to: Currency,
        date: NaiveDate,
    ) -> Option<&ConventionalRate> {
        self.settings.conventional_rates.iter().find(|c| {
            date >= c.effective_from && ((from == c.currency) != (to == c.currency))
        })
    }

    /// Converts through the conventional rate's reference currency.
    ///
    /// The leg between the reference and the non-gapped currency uses the
    /// official rate (with fallback search); the leg to or from the gapped
    /// currency uses the fixed conventional rate.
    fn bridge(
        &self,
        conventional: &ConventionalRate,
        from: Currency,
        to: Currency,
        date: NaiveDate,
    ) -> Option<RateQuote> {
        let rate = if to == conventional.currency {
            let official = self.official_rate(from, conventional.reference, date)?;
            official.checked_mul(conventional.rate)?
        } else {
            let official = self.official_rate(conventional.reference, to, date)?;
            official.checked_div(conventional.rate)?
        };

        debug!(
            from = %from,
            to = %to,
            date = %date,
            reference = %conventional.reference,
            rate = %rate,
            "Using conventional exchange rate"
        );

        Some(RateQuote {
            rate,
            origin: RateOrigin::Conventional,
        })
    }

    fn official_rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<Decimal> {
        if from == to {
            return Some(Decimal::ONE);
        }
        self.source
            .rate(date, from, to)
            .or_else(|| self.nearest_official(from, to, date).map(|q| q.rate))
    }

    fn nearest_official(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<RateQuote> {
        for offset in 1..=self.settings.fallback_window_days {
            let days = Days::new(u64::from(offset));
            let candidates = [
                (date.checked_add_days(days), i64::from(offset)),
                (date.checked_sub_days(days), -i64::from(offset)),
            ];
            for (candidate, offset_days) in candidates {
                let Some(candidate) = candidate else {
                    continue;
                };
                if let Some(rate) = self.source.rate(candidate, from, to) {
                    debug!(
                        from = %from,
                        to = %to,
                        date = %date,
                        offset_days,
                        "Using exchange rate from neighbouring date"
                    );
                    return Some(RateQuote {
                        rate,
                        origin: RateOrigin::Neighbor { offset_days },
                    });
                }
            }
        }
        None
    }
}
