//! Purchasing-power adjustment.
//!
//! A [`PurchasingPowerConverter`] re-expresses a nominal monthly series in
//! terms of the purchasing power of its earliest month, by compounding the
//! month-to-month value-change coefficients supplied by the implementation.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{Amount, Currency, MonthKey, MonthlySeries};

/// Converters registered per currency.
///
/// A currency without an entry has no purchasing-power-adjusted series.
pub type PurchasingPowerRegistry = HashMap<Currency, Arc<dyn PurchasingPowerConverter>>;

/// Re-expresses nominal amounts relative to a baseline month's purchasing power.
pub trait PurchasingPowerConverter: Send + Sync {
    /// Step coefficients starting at `baseline`.
    ///
    /// Element `i` is the relative value change from `baseline + i` months to
    /// `baseline + i + 1` months; `1` means no change. The vector has at most
    /// one element per step up to `last`, and is shorter when data runs out.
    fn value_changes(&self, baseline: MonthKey, last: MonthKey) -> Vec<Decimal>;

    /// Adjusts every month of `nominal` by its cumulative coefficient.
    ///
    /// The baseline is the earliest month of the series and has a cumulative
    /// coefficient of 1. Months past the end of the coefficient data, and
    /// months whose nominal amount is unavailable, come out unavailable.
    fn convert(&self, nominal: &MonthlySeries) -> MonthlySeries {
        let (Some(&baseline), Some(&last)) = (nominal.keys().next(), nominal.keys().next_back())
        else {
            return MonthlySeries::new();
        };

        let changes = self.value_changes(baseline, last);
        let cumulative = cumulative_coefficients(&changes);
        debug!(
            baseline = %baseline,
            last = %last,
            known_steps = changes.len(),
            "Compounding purchasing power coefficients"
        );

        nominal
            .iter()
            .map(|(month, amount)| {
                let coefficient = usize::try_from(baseline.months_until(*month))
                    .ok()
                    .and_then(|index| cumulative.get(index).copied().flatten());
                let adjusted = match (amount, coefficient) {
                    (Amount::Known(value), Some(coefficient)) => Decimal::from(*value)
                        .checked_mul(coefficient)
                        .map_or(Amount::Unavailable, Amount::from_decimal),
                    _ => Amount::Unavailable,
                };
                (*month, adjusted)
            })
            .collect()
    }
}

/// Running products of `changes`, starting with 1 for the baseline.
///
/// Entry `k` is the product of the first `k` step coefficients. A product
/// that overflows is `None`, as is everything after it.
pub fn cumulative_coefficients(changes: &[Decimal]) -> Vec<Option<Decimal>> {
    let mut result = Vec::with_capacity(changes.len() + 1);
    let mut running = Some(Decimal::ONE);
    result.push(running);
    for change in changes {
        running = running.and_then(|r| r.checked_mul(*change));
        result.push(running);
    }
    result
}
