//! Result of a salary normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Amount, Currency, MonthKey};

/// A single-currency monthly series, ordered chronologically.
pub type MonthlySeries = BTreeMap<MonthKey, Amount>;

/// Monthly amounts per currency, ordered chronologically.
pub type MonthlyTable = BTreeMap<MonthKey, BTreeMap<Currency, Amount>>;

/// Nominal and purchasing-power-adjusted salary tables.
///
/// A month appears in `salaries` only if at least one employment period
/// covers it. `salaries_purchasing_power` only holds currencies that have a
/// registered purchasing-power converter.
///
/// # Example
///
/// ```
/// use salary_normalizer::models::{Amount, ConvertedSalary, Currency, MonthKey};
///
/// let mut converted = ConvertedSalary::default();
/// let january = MonthKey::new(2014, 1).unwrap();
/// converted.insert_nominal(january, Currency::Rub, Amount::Known(40_000));
///
/// assert_eq!(converted.nominal(january, Currency::Rub), Some(Amount::Known(40_000)));
/// assert_eq!(converted.nominal(january, Currency::Usd), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedSalary {
    /// Nominal monthly totals per currency.
    pub salaries: MonthlyTable,
    /// Purchasing-power-adjusted monthly totals per currency.
    pub salaries_purchasing_power: MonthlyTable,
}

impl ConvertedSalary {
    /// Records a nominal amount.
    pub fn insert_nominal(&mut self, month: MonthKey, currency: Currency, amount: Amount) {
        self.salaries.entry(month).or_default().insert(currency, amount);
    }

    /// Records a purchasing-power-adjusted amount.
    pub fn insert_purchasing_power(&mut self, month: MonthKey, currency: Currency, amount: Amount) {
        self.salaries_purchasing_power
            .entry(month)
            .or_default()
            .insert(currency, amount);
    }

    /// The nominal amount for a month and currency, if one was computed.
    pub fn nominal(&self, month: MonthKey, currency: Currency) -> Option<Amount> {
        self.salaries.get(&month)?.get(&currency).copied()
    }

    /// The adjusted amount for a month and currency, if one was computed.
    pub fn purchasing_power(&self, month: MonthKey, currency: Currency) -> Option<Amount> {
        self.salaries_purchasing_power
            .get(&month)?
            .get(&currency)
            .copied()
    }

    /// Extracts the nominal series of one currency.
    pub fn nominal_series(&self, currency: Currency) -> MonthlySeries {
        column(&self.salaries, currency)
    }

    /// Extracts the adjusted series of one currency.
    pub fn purchasing_power_series(&self, currency: Currency) -> MonthlySeries {
        column(&self.salaries_purchasing_power, currency)
    }
}

fn column(table: &MonthlyTable, currency: Currency) -> MonthlySeries {
    table
        .iter()
        .filter_map(|(month, amounts)| amounts.get(&currency).map(|a| (*month, *a)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(m: u32) -> MonthKey {
        MonthKey::new(2020, m).unwrap()
    }

    #[test]
    fn test_series_extraction_skips_other_currencies() {
        let mut converted = ConvertedSalary::default();
        converted.insert_nominal(month(1), Currency::Usd, Amount::Known(100));
        converted.insert_nominal(month(1), Currency::Eur, Amount::Known(90));
        converted.insert_nominal(month(2), Currency::Eur, Amount::Unavailable);

        let usd = converted.nominal_series(Currency::Usd);
        assert_eq!(usd.len(), 1);
        assert_eq!(usd[&month(1)], Amount::Known(100));

        let eur = converted.nominal_series(Currency::Eur);
        assert_eq!(eur[&month(2)], Amount::Unavailable);
    }

    #[test]
    fn test_serialized_form_keeps_unavailable_as_null() {
        let mut converted = ConvertedSalary::default();
        converted.insert_nominal(month(3), Currency::Usd, Amount::Known(0));
        converted.insert_purchasing_power(month(3), Currency::Usd, Amount::Unavailable);

        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(json["salaries"]["2020-03-01"]["USD"], serde_json::json!(0));
        assert!(json["salaries_purchasing_power"]["2020-03-01"]["USD"].is_null());
    }
}
