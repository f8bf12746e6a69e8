//! Salary and employment period models.
//!
//! This module contains the [`Salary`] and [`EmploymentPeriod`] types that
//! form the input of a salary normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::MonthSequence;
use crate::error::{EngineError, EngineResult};

use super::Currency;

/// A monthly salary: a whole amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    /// Amount paid per month, in whole units of `currency`.
    pub amount: i64,
    /// The currency the salary is paid in.
    pub currency: Currency,
}

impl Salary {
    /// Creates a new salary.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

/// A span of employment with a fixed monthly salary.
///
/// Both `begin` and `end` are inclusive. Periods may overlap, for example
/// when two part-time jobs run in parallel.
///
/// Construction (including deserialization) rejects a period whose `begin`
/// lies after its `end`.
///
/// # Example
///
/// ```
/// use salary_normalizer::models::{Currency, EmploymentPeriod, Salary};
/// use chrono::NaiveDate;
///
/// let period = EmploymentPeriod::new(
///     "Acme",
///     NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2014, 3, 31).unwrap(),
///     Salary::new(40_000, Currency::Rub),
/// )
/// .unwrap();
///
/// assert_eq!(period.months().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmploymentPeriodRecord")]
pub struct EmploymentPeriod {
    /// Label of the employer.
    pub employer: String,
    /// First day of employment (inclusive).
    pub begin: NaiveDate,
    /// Last day of employment (inclusive).
    pub end: NaiveDate,
    /// The monthly salary for the whole period.
    pub salary: Salary,
}

impl EmploymentPeriod {
    /// Creates a validated employment period.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] if `begin` is after `end`.
    pub fn new(
        employer: impl Into<String>,
        begin: NaiveDate,
        end: NaiveDate,
        salary: Salary,
    ) -> EngineResult<Self> {
        let employer = employer.into();
        if begin > end {
            return Err(EngineError::InvalidPeriod {
                employer,
                message: format!("begin {} is after end {}", begin, end),
            });
        }
        Ok(Self {
            employer,
            begin,
            end,
            salary,
        })
    }

    /// The dates of every month the period covers, starting at `begin`.
    pub fn months(&self) -> MonthSequence {
        MonthSequence::new(self.begin, self.end)
    }
}

/// Unvalidated wire form of [`EmploymentPeriod`].
#[derive(Debug, Deserialize)]
struct EmploymentPeriodRecord {
    #[serde(alias = "company")]
    employer: String,
    begin: NaiveDate,
    end: NaiveDate,
    salary: Salary,
}

impl TryFrom<EmploymentPeriodRecord> for EmploymentPeriod {
    type Error = EngineError;

    fn try_from(record: EmploymentPeriodRecord) -> Result<Self, Self::Error> {
        EmploymentPeriod::new(record.employer, record.begin, record.end, record.salary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_accepts_single_day_period() {
        let period = EmploymentPeriod::new(
            "Acme",
            date(2020, 3, 15),
            date(2020, 3, 15),
            Salary::new(1000, Currency::Usd),
        );
        assert!(period.is_ok());
    }

    #[test]
    fn test_new_rejects_begin_after_end() {
        let result = EmploymentPeriod::new(
            "Acme",
            date(2020, 2, 1),
            date(2020, 1, 1),
            Salary::new(1000, Currency::Usd),
        );

        match result {
            Err(EngineError::InvalidPeriod { employer, message }) => {
                assert_eq!(employer, "Acme");
                assert!(message.contains("2020-02-01"));
            }
            other => panic!("Expected InvalidPeriod error, got {:?}", other),
        }
    }

    #[test]
    fn test_months_cover_partial_boundary_months() {
        let period = EmploymentPeriod::new(
            "Acme",
            date(2020, 1, 20),
            date(2020, 3, 5),
            Salary::new(1000, Currency::Usd),
        )
        .unwrap();

        let months: Vec<_> = period.months().collect();
        assert_eq!(
            months,
            vec![date(2020, 1, 20), date(2020, 2, 20), date(2020, 3, 20)]
        );
    }

    #[test]
    fn test_deserialize_validates_dates() {
        let json = r#"{
            "employer": "Acme",
            "begin": "2020-05-01",
            "end": "2020-04-01",
            "salary": {"amount": 100, "currency": "USD"}
        }"#;

        let result: Result<EmploymentPeriod, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid employment period 'Acme'"), "{}", err);
    }

    #[test]
    fn test_deserialize_accepts_company_alias() {
        let json = r#"{
            "company": "Initech",
            "begin": "2020-01-01",
            "end": "2020-12-31",
            "salary": {"amount": 5000, "currency": "EUR"}
        }"#;

        let period: EmploymentPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.employer, "Initech");
        assert_eq!(period.salary, Salary::new(5000, Currency::Eur));
    }
}
