//! Salary normalization across employment periods.
//!
//! [`SalaryCalculator`] turns a list of employment periods into monthly
//! totals per currency, and, for currencies with a registered
//! purchasing-power converter, into purchasing-power-adjusted totals.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::models::{
    Amount, ConvertedSalary, Currency, EmploymentPeriod, MonthKey, MonthlySeries,
};

use super::currency_converter::CurrencyConverter;
use super::purchasing_power::PurchasingPowerRegistry;

/// Combines currency conversion and purchasing-power adjustment.
///
/// The calculator holds only read-only collaborators, so one instance can
/// serve any number of conversions.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use salary_normalizer::calculation::{
///     CurrencyConverter, PurchasingPowerRegistry, SalaryCalculator,
/// };
/// use salary_normalizer::config::ConversionSettings;
/// use salary_normalizer::data::RateTable;
/// use salary_normalizer::models::{Amount, Currency, EmploymentPeriod, MonthKey, Salary};
/// use chrono::NaiveDate;
///
/// let converter = CurrencyConverter::new(
///     Arc::new(RateTable::new(Currency::Eur)),
///     ConversionSettings::default(),
/// );
/// let calculator = SalaryCalculator::new(converter, PurchasingPowerRegistry::new());
///
/// let period = EmploymentPeriod::new(
///     "Acme",
///     NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2014, 3, 31).unwrap(),
///     Salary::new(40_000, Currency::Rub),
/// )
/// .unwrap();
///
/// let converted = calculator.convert(&[period], &[Currency::Rub], &[]);
/// let february = MonthKey::new(2014, 2).unwrap();
/// assert_eq!(converted.nominal(february, Currency::Rub), Some(Amount::Known(40_000)));
/// ```
#[derive(Clone)]
pub struct SalaryCalculator {
    currency_converter: CurrencyConverter,
    purchasing_power_converters: PurchasingPowerRegistry,
}

impl SalaryCalculator {
    /// Creates a calculator from its collaborators.
    pub fn new(
        currency_converter: CurrencyConverter,
        purchasing_power_converters: PurchasingPowerRegistry,
    ) -> Self {
        Self {
            currency_converter,
            purchasing_power_converters,
        }
    }

    /// Returns true if `currency` has a purchasing-power converter.
    pub fn supports_purchasing_power(&self, currency: Currency) -> bool {
        self.purchasing_power_converters.contains_key(&currency)
    }

    /// Normalizes `periods` into monthly tables.
    ///
    /// `currencies` selects the nominal series to produce and
    /// `purchasing_power_currencies` the adjusted ones. A purchasing-power
    /// currency without a registered converter is skipped.
    pub fn convert(
        &self,
        periods: &[EmploymentPeriod],
        currencies: &[Currency],
        purchasing_power_currencies: &[Currency],
    ) -> ConvertedSalary {
        let mut result = ConvertedSalary::default();
        let mut nominal: BTreeMap<Currency, MonthlySeries> = BTreeMap::new();

        for &currency in currencies {
            let series = nominal
                .entry(currency)
                .or_insert_with(|| self.nominal_series(periods, currency));
            for (month, amount) in series.iter() {
                result.insert_nominal(*month, currency, *amount);
            }
        }

        for &currency in purchasing_power_currencies {
            let Some(converter) = self.purchasing_power_converters.get(&currency) else {
                debug!(currency = %currency, "No purchasing power converter registered");
                continue;
            };
            let series = nominal
                .entry(currency)
                .or_insert_with(|| self.nominal_series(periods, currency));
            for (month, amount) in converter.convert(series) {
                result.insert_purchasing_power(month, currency, amount);
            }
        }

        info!(
            periods = periods.len(),
            months = result.salaries.len(),
            currencies = currencies.len(),
            purchasing_power_currencies = purchasing_power_currencies.len(),
            "Salary normalization completed"
        );
        result
    }

    /// Monthly totals of every period converted into `currency`.
    ///
    /// A month is unavailable as soon as any contribution to it is.
    pub fn nominal_series(
        &self,
        periods: &[EmploymentPeriod],
        currency: Currency,
    ) -> MonthlySeries {
        let mut series = MonthlySeries::new();

        for period in periods {
            let salary = period.salary;
            for date in period.months() {
                let converted = self.currency_converter.convert(
                    salary.amount,
                    salary.currency,
                    currency,
                    date,
                );
                let total = series.entry(MonthKey::from(date)).or_insert(Amount::Known(0));
                *total = *total + converted;
            }
        }

        let unavailable = series.values().filter(|a| !a.is_known()).count();
        if unavailable > 0 {
            debug!(
                currency = %currency,
                unavailable_months = unavailable,
                "Some months could not be converted"
            );
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::PurchasingPowerConverter;
    use crate::config::ConversionSettings;
    use crate::data::{CoefficientTable, RateTable};
    use crate::models::Salary;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn period(
        employer: &str,
        begin: NaiveDate,
        end: NaiveDate,
        amount: i64,
        currency: Currency,
    ) -> EmploymentPeriod {
        EmploymentPeriod::new(employer, begin, end, Salary::new(amount, currency)).unwrap()
    }

    fn calculator_with(table: RateTable, registry: PurchasingPowerRegistry) -> SalaryCalculator {
        let settings = ConversionSettings {
            fallback_window_days: 3,
            conventional_rates: vec![],
        };
        SalaryCalculator::new(CurrencyConverter::new(Arc::new(table), settings), registry)
    }

    #[test]
    fn test_single_period_identity() {
        let calculator =
            calculator_with(RateTable::new(Currency::Eur), PurchasingPowerRegistry::new());
        let periods = [period("Acme", date(2014, 1, 1), date(2014, 3, 31), 40_000, Currency::Rub)];

        let converted = calculator.convert(&periods, &[Currency::Rub], &[]);

        assert_eq!(converted.salaries.len(), 3);
        for m in 1..=3 {
            assert_eq!(
                converted.nominal(month(2014, m), Currency::Rub),
                Some(Amount::Known(40_000))
            );
        }
        assert!(converted.salaries_purchasing_power.is_empty());
    }

    #[test]
    fn test_overlapping_periods_are_summed() {
        let mut table = RateTable::new(Currency::Eur);
        table.insert(date(2020, 3, 1), Currency::Usd, dec("2"));
        let calculator = calculator_with(table, PurchasingPowerRegistry::new());

        let periods = [
            period("A", date(2020, 3, 1), date(2020, 3, 31), 500, Currency::Eur),
            period("B", date(2020, 3, 1), date(2020, 3, 31), 2000, Currency::Usd),
        ];

        let converted = calculator.convert(&periods, &[Currency::Usd], &[]);
        assert_eq!(
            converted.nominal(month(2020, 3), Currency::Usd),
            Some(Amount::Known(3000))
        );
    }

    #[test]
    fn test_one_unavailable_contribution_makes_month_unavailable() {
        let mut table = RateTable::new(Currency::Eur);
        table.insert(date(2020, 3, 1), Currency::Usd, dec("2"));
        let calculator = calculator_with(table, PurchasingPowerRegistry::new());

        // No GBP quote anywhere near March 2020.
        let periods = [
            period("A", date(2020, 3, 1), date(2020, 3, 31), 500, Currency::Eur),
            period("B", date(2020, 3, 1), date(2020, 3, 31), 2000, Currency::Gbp),
        ];

        let converted = calculator.convert(&periods, &[Currency::Usd], &[]);
        assert_eq!(
            converted.nominal(month(2020, 3), Currency::Usd),
            Some(Amount::Unavailable)
        );
    }

    #[test]
    fn test_uncovered_months_are_absent() {
        let calculator =
            calculator_with(RateTable::new(Currency::Eur), PurchasingPowerRegistry::new());
        let periods = [
            period("A", date(2020, 1, 1), date(2020, 1, 31), 100, Currency::Eur),
            period("B", date(2020, 4, 1), date(2020, 4, 30), 100, Currency::Eur),
        ];

        let converted = calculator.convert(&periods, &[Currency::Eur], &[]);
        assert_eq!(converted.salaries.len(), 2);
        assert_eq!(converted.nominal(month(2020, 2), Currency::Eur), None);
    }

    #[test]
    fn test_purchasing_power_series_uses_registered_converter() {
        let mut coefficients = CoefficientTable::new();
        coefficients.insert(month(2020, 1), dec("1.02"));
        coefficients.insert(month(2020, 2), dec("0.98"));

        let mut registry = PurchasingPowerRegistry::new();
        registry.insert(
            Currency::Rub,
            Arc::new(coefficients) as Arc<dyn PurchasingPowerConverter>,
        );
        let calculator = calculator_with(RateTable::new(Currency::Eur), registry);

        let periods = [period("Acme", date(2020, 1, 1), date(2020, 4, 30), 10_000, Currency::Rub)];
        let converted = calculator.convert(&periods, &[], &[Currency::Rub, Currency::Usd]);

        // Nominal series computed internally but not requested.
        assert!(converted.salaries.is_empty());
        assert_eq!(
            converted.purchasing_power_series(Currency::Rub),
            MonthlySeries::from([
                (month(2020, 1), Amount::Known(10_000)),
                (month(2020, 2), Amount::Known(10_200)),
                (month(2020, 3), Amount::Known(9_996)),
                (month(2020, 4), Amount::Unavailable),
            ])
        );
        assert!(converted.purchasing_power_series(Currency::Usd).is_empty());
        assert!(calculator.supports_purchasing_power(Currency::Rub));
        assert!(!calculator.supports_purchasing_power(Currency::Usd));
    }

    #[test]
    fn test_no_periods_yields_empty_tables() {
        let calculator =
            calculator_with(RateTable::new(Currency::Eur), PurchasingPowerRegistry::new());
        let converted = calculator.convert(&[], &[Currency::Usd], &[Currency::Usd]);
        assert_eq!(converted, ConvertedSalary::default());
    }
}
