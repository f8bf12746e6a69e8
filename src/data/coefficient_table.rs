//! Month-keyed purchasing-power coefficients.
//!
//! [`CoefficientTable`] holds, for each month, the relative value change from
//! that month to the next. It is the local cache of a remote statistics
//! service: it persists as a human-readable JSON object and is refreshed
//! incrementally through a [`CoefficientFetcher`].

use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculation::{MonthSequence, PurchasingPowerConverter};
use crate::error::{EngineError, EngineResult};
use crate::models::MonthKey;

/// Remote provider of purchasing-power statistics.
///
/// Implementations perform the network I/O and report provider failures as
/// [`EngineError::DataSource`].
pub trait CoefficientFetcher {
    /// The first and last months the provider has data for.
    fn available_range(&self) -> EngineResult<(MonthKey, MonthKey)>;

    /// Relative value change between the start of `start` and the start of `end`.
    fn value_change(&self, start: MonthKey, end: MonthKey) -> EngineResult<Decimal>;
}

/// Step coefficients keyed by month.
///
/// The entry for month `m` is the relative value change from `m` to the
/// following month.
///
/// # Example
///
/// ```
/// use salary_normalizer::calculation::PurchasingPowerConverter;
/// use salary_normalizer::data::CoefficientTable;
/// use salary_normalizer::models::MonthKey;
/// use rust_decimal::Decimal;
///
/// let january = MonthKey::new(2020, 1).unwrap();
/// let mut table = CoefficientTable::new();
/// table.insert(january, Decimal::new(102, 2));
///
/// let march = MonthKey::new(2020, 3).unwrap();
/// // Only the January step is known.
/// assert_eq!(table.value_changes(january, march), vec![Decimal::new(102, 2)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientTable {
    changes: BTreeMap<MonthKey, Decimal>,
}

impl CoefficientTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step coefficient from `month` to the following month.
    pub fn insert(&mut self, month: MonthKey, change: Decimal) {
        self.changes.insert(month, change);
    }

    /// The step coefficient from `month` to the following month.
    pub fn get(&self, month: MonthKey) -> Option<Decimal> {
        self.changes.get(&month).copied()
    }

    /// The latest month with a known step coefficient.
    pub fn last_month(&self) -> Option<MonthKey> {
        self.changes.keys().next_back().copied()
    }

    /// Number of months with a known coefficient.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if no coefficients are known.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Loads a cached table from `path`.
    ///
    /// A missing or malformed cache yields an empty table, so the next
    /// [`refresh`](Self::refresh) fetches everything again.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "No coefficient cache");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(table) => table,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Malformed coefficient cache, starting empty"
                );
                Self::default()
            }
        }
    }

    /// Writes the table to `path` as pretty-printed JSON with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CacheWrite`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        let path = path.as_ref();
        let cache_error = |message: String| EngineError::CacheWrite {
            path: path.display().to_string(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| cache_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| cache_error(e.to_string()))
    }

    /// Fetches the months the cache is missing.
    ///
    /// Fetching restarts at the last cached month (or the provider's first
    /// month for an empty cache) and walks to the provider's last month in
    /// steps of `months_step`. A change fetched over a multi-month step is
    /// spread evenly, as its `months_step`-th root, over each month of the
    /// step. Returns the number of months written.
    ///
    /// # Errors
    ///
    /// Provider failures are propagated unchanged. Months fetched before the
    /// failure stay in the table.
    pub fn refresh<F>(&mut self, fetcher: &F, months_step: NonZeroU32) -> EngineResult<usize>
    where
        F: CoefficientFetcher + ?Sized,
    {
        let (first_available, last_available) = fetcher.available_range()?;
        let last_cached = self.last_month();

        info!(
            latest_cached = ?last_cached.map(|m| m.to_string()),
            latest_available = %last_available,
            "Updating purchasing power statistics"
        );

        let start = last_cached.map_or(first_available, |cached| cached.max(first_available));
        let boundaries: Vec<MonthKey> = MonthSequence::with_step(
            start.first_day(),
            last_available.first_day(),
            months_step,
        )
        .map(MonthKey::from)
        .collect();

        let mut written = 0;
        for window in boundaries.windows(2) {
            let (from, to) = (window[0], window[1]);
            let change = fetcher.value_change(from, to)?;
            let per_month = spread_change(change, months_step)?;

            debug!(from = %from, to = %to, change = %change, "Fetched purchasing power change");

            for month in MonthKey::range(from, to).take_while(|m| *m < to) {
                self.changes.insert(month, per_month);
                written += 1;
            }
        }

        info!(months = written, "Purchasing power statistics updated");
        Ok(written)
    }
}

fn spread_change(change: Decimal, months_step: NonZeroU32) -> EngineResult<Decimal> {
    if months_step.get() == 1 {
        return Ok(change);
    }
    let exponent = Decimal::ONE / Decimal::from(months_step.get());
    change
        .checked_powd(exponent)
        .ok_or_else(|| EngineError::DataSource {
            message: format!(
                "cannot spread change {} over {} months",
                change, months_step
            ),
        })
}

impl PurchasingPowerConverter for CoefficientTable {
    fn value_changes(&self, baseline: MonthKey, last: MonthKey) -> Vec<Decimal> {
        MonthKey::range(baseline, last)
            .take_while(|m| *m < last)
            .map_while(|m| self.get(m))
            .collect()
    }
}
