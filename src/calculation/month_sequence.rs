//! Month sequencing over date ranges.
//!
//! This module provides [`MonthSequence`], the iterator used to enumerate
//! the months an employment period covers.

use std::num::NonZeroU32;

use chrono::{Months, NaiveDate};

use crate::models::MonthKey;

/// A lazy, restartable sequence of dates one (or `step`) month apart.
///
/// The sequence starts at `begin` and runs through the month of `end`
/// inclusive. Each element is `begin` advanced by a whole number of months;
/// when that lands past the end of a shorter month, the day is clamped to the
/// month's last day. The clamp does not carry over, so stepping from Jan 31
/// yields Feb 28 (or 29) and then Mar 31.
///
/// # Example
///
/// ```
/// use salary_normalizer::calculation::MonthSequence;
/// use chrono::NaiveDate;
///
/// let begin = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// let dates: Vec<_> = MonthSequence::new(begin, end).collect();
/// assert_eq!(
///     dates,
///     vec![
///         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MonthSequence {
    anchor: NaiveDate,
    last: MonthKey,
    step: u32,
    offset: Option<u32>,
}

impl MonthSequence {
    /// Creates a sequence advancing one month at a time.
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Self {
        Self::with_step(begin, end, NonZeroU32::MIN)
    }

    /// Creates a sequence advancing `step` months at a time.
    pub fn with_step(begin: NaiveDate, end: NaiveDate, step: NonZeroU32) -> Self {
        Self {
            anchor: begin,
            last: MonthKey::from(end),
            step: step.get(),
            offset: Some(0),
        }
    }

    fn remaining_months(&self) -> u64 {
        let Some(offset) = self.offset else {
            return 0;
        };
        let span = MonthKey::from(self.anchor).months_until(self.last) - i64::from(offset);
        match u64::try_from(span) {
            Ok(span) => span / u64::from(self.step) + 1,
            Err(_) => 0,
        }
    }
}

impl Iterator for MonthSequence {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let offset = self.offset?;
        let current = self.anchor.checked_add_months(Months::new(offset));

        match current {
            Some(date) if MonthKey::from(date) <= self.last => {
                self.offset = offset.checked_add(self.step);
                Some(date)
            }
            _ => {
                self.offset = None;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining_months()).unwrap_or(usize::MAX);
        (0, Some(remaining))
    }
}

impl std::iter::FusedIterator for MonthSequence {}
