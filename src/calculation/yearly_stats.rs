//! Yearly summaries of normalized salaries.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{ConvertedSalary, Currency};

/// Summary of one currency's known monthly amounts within a calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyStats {
    /// Smallest monthly amount.
    pub min: i64,
    /// Largest monthly amount.
    pub max: i64,
    /// Sum of monthly amounts.
    pub sum: i64,
    /// Mean monthly amount, rounded to 2 decimal places.
    pub average: Decimal,
    /// Number of months with a known amount.
    pub months: u32,
    /// Number of months whose amount was unavailable.
    pub unavailable_months: u32,
}

/// Year-over-year change of the average monthly salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOverYear {
    /// The calendar year.
    pub year: i32,
    /// Average monthly amount, truncated to whole units.
    pub monthly_average: i64,
    /// Truncated percent change against the previous listed year.
    pub percent_change: Option<i64>,
}

#[derive(Default)]
struct Accumulator {
    known: Vec<i64>,
    unavailable: u32,
}

/// Summarizes the nominal table of `converted` per year and currency.
///
/// Unavailable months are counted but excluded from the figures. A year and
/// currency with no known month, or whose sum does not fit in an `i64`, has
/// no entry.
///
/// # Example
///
/// ```
/// use salary_normalizer::calculation::yearly_stats;
/// use salary_normalizer::models::{Amount, ConvertedSalary, Currency, MonthKey};
///
/// let mut converted = ConvertedSalary::default();
/// converted.insert_nominal(MonthKey::new(2020, 1).unwrap(), Currency::Usd, Amount::Known(1000));
/// converted.insert_nominal(MonthKey::new(2020, 2).unwrap(), Currency::Usd, Amount::Known(3000));
///
/// let stats = yearly_stats(&converted);
/// let usd_2020 = &stats[&2020][&Currency::Usd];
/// assert_eq!(usd_2020.sum, 4000);
/// assert_eq!(usd_2020.months, 2);
/// ```
pub fn yearly_stats(converted: &ConvertedSalary) -> BTreeMap<i32, BTreeMap<Currency, YearlyStats>> {
    let mut grouped: BTreeMap<i32, BTreeMap<Currency, Accumulator>> = BTreeMap::new();

    for (month, amounts) in &converted.salaries {
        for (currency, amount) in amounts {
            let accumulator = grouped
                .entry(month.year())
                .or_default()
                .entry(*currency)
                .or_default();
            match amount.value() {
                Some(value) => accumulator.known.push(value),
                None => accumulator.unavailable += 1,
            }
        }
    }

    grouped
        .into_iter()
        .map(|(year, per_currency)| {
            let stats = per_currency
                .into_iter()
                .filter_map(|(currency, acc)| summarize(&acc).map(|s| (currency, s)))
                .collect::<BTreeMap<_, _>>();
            (year, stats)
        })
        .filter(|(_, stats)| !stats.is_empty())
        .collect()
}

fn summarize(acc: &Accumulator) -> Option<YearlyStats> {
    let min = *acc.known.iter().min()?;
    let max = *acc.known.iter().max()?;
    let Some(sum) = acc.known.iter().try_fold(0i64, |total, v| total.checked_add(*v)) else {
        warn!(months = acc.known.len(), "Yearly sum overflows, omitting statistics");
        return None;
    };
    let months = u32::try_from(acc.known.len()).ok()?;
    let average = (Decimal::from(sum) / Decimal::from(months)).round_dp(2);

    Some(YearlyStats {
        min,
        max,
        sum,
        average,
        months,
        unavailable_months: acc.unavailable,
    })
}

/// Lists the average monthly amount of `currency` per year with its change
/// against the previous listed year.
///
/// The first year, and any year following a zero average, has no percent
/// change.
pub fn year_over_year(
    stats: &BTreeMap<i32, BTreeMap<Currency, YearlyStats>>,
    currency: Currency,
) -> Vec<YearOverYear> {
    let mut result = Vec::new();
    let mut previous: Option<i64> = None;

    for (year, per_currency) in stats {
        let Some(yearly) = per_currency.get(&currency) else {
            continue;
        };
        let monthly_average = yearly.average.trunc().to_i64().unwrap_or_default();
        let percent_change = previous
            .filter(|p| *p != 0)
            .and_then(|p| {
                let ratio = Decimal::from(monthly_average) / Decimal::from(p) - Decimal::ONE;
                (ratio * Decimal::ONE_HUNDRED).trunc().to_i64()
            });

        result.push(YearOverYear {
            year: *year,
            monthly_average,
            percent_change,
        });
        previous = Some(monthly_average);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, MonthKey};

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn converted(entries: &[(MonthKey, Currency, Amount)]) -> ConvertedSalary {
        let mut converted = ConvertedSalary::default();
        for (m, c, a) in entries {
            converted.insert_nominal(*m, *c, *a);
        }
        converted
    }

    #[test]
    fn test_stats_per_year_and_currency() {
        let data = converted(&[
            (month(2019, 11), Currency::Usd, Amount::Known(1000)),
            (month(2019, 12), Currency::Usd, Amount::Known(2000)),
            (month(2020, 1), Currency::Usd, Amount::Known(3000)),
            (month(2020, 1), Currency::Eur, Amount::Known(2700)),
        ]);

        let stats = yearly_stats(&data);

        let usd_2019 = &stats[&2019][&Currency::Usd];
        assert_eq!(usd_2019.min, 1000);
        assert_eq!(usd_2019.max, 2000);
        assert_eq!(usd_2019.sum, 3000);
        assert_eq!(usd_2019.months, 2);
        assert_eq!(usd_2019.average, Decimal::from(1500));

        assert_eq!(stats[&2020].len(), 2);
        assert!(!stats[&2019].contains_key(&Currency::Eur));
    }

    #[test]
    fn test_unavailable_months_are_counted_not_summed() {
        let data = converted(&[
            (month(2020, 1), Currency::Usd, Amount::Known(1000)),
            (month(2020, 2), Currency::Usd, Amount::Unavailable),
            (month(2020, 3), Currency::Usd, Amount::Known(0)),
        ]);

        let stats = yearly_stats(&data);
        let usd = &stats[&2020][&Currency::Usd];

        assert_eq!(usd.sum, 1000);
        assert_eq!(usd.min, 0);
        assert_eq!(usd.months, 2);
        assert_eq!(usd.unavailable_months, 1);
        assert_eq!(usd.average, Decimal::from(500));
    }

    #[test]
    fn test_overflowing_year_sum_is_omitted() {
        let data = converted(&[
            (month(2020, 1), Currency::Usd, Amount::Known(5_000_000_000_000_000_000)),
            (month(2020, 2), Currency::Usd, Amount::Known(5_000_000_000_000_000_000)),
            (month(2020, 1), Currency::Eur, Amount::Known(1000)),
        ]);

        let stats = yearly_stats(&data);

        assert!(!stats[&2020].contains_key(&Currency::Usd));
        assert_eq!(stats[&2020][&Currency::Eur].sum, 1000);
    }

    #[test]
    fn test_year_with_only_unavailable_months_is_omitted() {
        let data = converted(&[(month(2021, 5), Currency::Usd, Amount::Unavailable)]);
        assert!(yearly_stats(&data).is_empty());
    }

    #[test]
    fn test_year_over_year_change() {
        let data = converted(&[
            (month(2019, 1), Currency::Usd, Amount::Known(1000)),
            (month(2020, 1), Currency::Usd, Amount::Known(1150)),
            (month(2021, 1), Currency::Usd, Amount::Known(1000)),
        ]);

        let changes = year_over_year(&yearly_stats(&data), Currency::Usd);

        assert_eq!(
            changes,
            vec![
                YearOverYear { year: 2019, monthly_average: 1000, percent_change: None },
                YearOverYear { year: 2020, monthly_average: 1150, percent_change: Some(15) },
                YearOverYear { year: 2021, monthly_average: 1000, percent_change: Some(-13) },
            ]
        );
    }

    #[test]
    fn test_year_over_year_after_zero_average_has_no_change() {
        let data = converted(&[
            (month(2019, 1), Currency::Usd, Amount::Known(0)),
            (month(2020, 1), Currency::Usd, Amount::Known(500)),
        ]);

        let changes = year_over_year(&yearly_stats(&data), Currency::Usd);
        assert_eq!(changes[1].percent_change, None);
    }
}
