//! Calendar month keys.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month, normalized to its first day.
///
/// Ordering is chronological. Keys serialize as the ISO date of the first
/// day of the month (`2014-01-01`), which keeps JSON maps human-readable and
/// sorted.
///
/// # Example
///
/// ```
/// use salary_normalizer::models::MonthKey;
/// use chrono::NaiveDate;
///
/// let key = MonthKey::from(NaiveDate::from_ymd_opt(2020, 3, 17).unwrap());
/// assert_eq!(key.first_day(), NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
/// assert_eq!(key.to_string(), "2020-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a key for the given year and month (1-12).
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::from)
    }

    /// The calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// The calendar month, 1-12.
    pub fn month(self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(self) -> NaiveDate {
        // Keys are only built from valid dates.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The following month, if representable.
    pub fn succ(self) -> Option<Self> {
        self.first_day()
            .checked_add_months(Months::new(1))
            .map(Self::from)
    }

    /// Number of months from `self` to `later`; negative if `later` is earlier.
    pub fn months_until(self, later: MonthKey) -> i64 {
        (i64::from(later.year) - i64::from(self.year)) * 12 + i64::from(later.month)
            - i64::from(self.month)
    }

    /// Iterates every month from `first` to `last` inclusive.
    ///
    /// Empty when `first` is after `last`.
    pub fn range(first: MonthKey, last: MonthKey) -> impl Iterator<Item = MonthKey> + Clone {
        std::iter::successors(Some(first), |m| m.succ()).take_while(move |m| *m <= last)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.first_day().format("%Y-%m-%d"))
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NaiveDate::deserialize(deserializer).map(MonthKey::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn test_equality_ignores_day() {
        let a = MonthKey::from(NaiveDate::from_ymd_opt(2019, 5, 1).unwrap());
        let b = MonthKey::from(NaiveDate::from_ymd_opt(2019, 5, 31).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(month(2019, 12) < month(2020, 1));
        assert!(month(2020, 2) < month(2020, 11));
    }

    #[test]
    fn test_succ_rolls_over_year() {
        assert_eq!(month(2019, 12).succ(), Some(month(2020, 1)));
    }

    #[test]
    fn test_months_until() {
        assert_eq!(month(2014, 1).months_until(month(2014, 3)), 2);
        assert_eq!(month(2014, 11).months_until(month(2015, 2)), 3);
        assert_eq!(month(2015, 2).months_until(month(2014, 11)), -3);
    }

    #[test]
    fn test_range_is_inclusive() {
        let months: Vec<_> = MonthKey::range(month(2019, 11), month(2020, 2)).collect();
        assert_eq!(
            months,
            vec![month(2019, 11), month(2019, 12), month(2020, 1), month(2020, 2)]
        );
    }

    #[test]
    fn test_range_empty_when_reversed() {
        assert_eq!(MonthKey::range(month(2020, 2), month(2020, 1)).count(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(MonthKey::new(2020, 13).is_none());
        assert!(MonthKey::new(2020, 0).is_none());
    }

    #[test]
    fn test_serializes_as_first_day() {
        let json = serde_json::to_string(&month(2014, 3)).unwrap();
        assert_eq!(json, "\"2014-03-01\"");

        let parsed: MonthKey = serde_json::from_str("\"2014-03-15\"").unwrap();
        assert_eq!(parsed, month(2014, 3));
    }
}
