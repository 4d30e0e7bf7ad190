//! Analytics Engine - spending patterns, trends, forecasts and reports
//!
//! Every operation is synchronous and stateless: it fetches one snapshot from
//! the injected collaborators, computes, and returns a fresh value. Nothing is
//! cached between calls, so concurrent calls never interfere.
//!
//! ## Components
//!
//! - **Pattern Analyzer** - per-category frequency, periodicity and trend
//! - **Trend Engine** - month-over-month expense changes
//! - **Forecaster** - trend-adjusted projections with a heuristic confidence
//! - **Period Comparator** - deltas between two arbitrary date ranges
//! - **Report Builder** - monthly, annual and executive reports
//! - **Category Suggester** - keyword-overlap category guess
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cadence_core::{Analytics, MemoryStore};
//!
//! let store = MemoryStore::new(transactions, categories);
//! let analytics = Analytics::new(&store, &store);
//! let patterns = analytics.analyze_patterns(6)?;
//! ```

pub mod compare;
pub mod forecast;
pub mod patterns;
pub mod reports;
pub mod stats;
pub mod suggest;
pub mod trends;

use chrono::{NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::models::{DateRange, Transaction};
use crate::source::{CategoryDirectory, CategoryNames, TransactionSource};

pub use patterns::classify_periodicity;
pub use stats::percent_change;

/// Entry point for all analytics operations
pub struct Analytics<'a> {
    transactions: &'a dyn TransactionSource,
    categories: &'a dyn CategoryDirectory,
    today: NaiveDate,
}

impl<'a> Analytics<'a> {
    /// Create an engine anchored on the current UTC date
    pub fn new(
        transactions: &'a dyn TransactionSource,
        categories: &'a dyn CategoryDirectory,
    ) -> Self {
        Self::with_today(transactions, categories, Utc::now().date_naive())
    }

    /// Create an engine anchored on a fixed date
    pub fn with_today(
        transactions: &'a dyn TransactionSource,
        categories: &'a dyn CategoryDirectory,
        today: NaiveDate,
    ) -> Self {
        Self {
            transactions,
            categories,
            today,
        }
    }

    /// Fetch transactions in `range`, sorted by (date, id)
    ///
    /// Any collaborator failure surfaces as `DataUnavailable`.
    fn fetch(&self, range: DateRange) -> Result<Vec<Transaction>> {
        let mut transactions = self
            .transactions
            .get_by_date_range(range.start, range.end)
            .map_err(unavailable)?;
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(transactions)
    }

    fn names(&self) -> Result<CategoryNames> {
        CategoryNames::load(self.categories).map_err(unavailable)
    }
}

fn unavailable(err: Error) -> Error {
    match err {
        Error::DataUnavailable(_) => err,
        other => Error::DataUnavailable(other.to_string()),
    }
}

/// Reject zero month counts
fn validate_months(name: &str, months: u32) -> Result<()> {
    if months == 0 {
        return Err(Error::InvalidRange(format!("{} must be positive", name)));
    }
    Ok(())
}

/// Reject ranges whose end precedes their start
fn validate_range(range: &DateRange) -> Result<()> {
    if range.end < range.start {
        return Err(Error::InvalidRange(format!(
            "end date {} is before start date {}",
            range.end, range.start
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryStore;
    use crate::test_utils::{date, FailingSource};

    #[test]
    fn test_fetch_sorts_by_date_then_id() {
        let store = MemoryStore::new(
            vec![
                crate::test_utils::expense(3, date(2026, 5, 2), 5.0, None),
                crate::test_utils::expense(2, date(2026, 5, 1), 5.0, None),
                crate::test_utils::expense(1, date(2026, 5, 2), 5.0, None),
            ],
            vec![],
        );
        let analytics = Analytics::with_today(&store, &store, date(2026, 6, 1));
        let txs = analytics
            .fetch(DateRange::new(date(2026, 1, 1), date(2026, 12, 31)))
            .unwrap();
        let ids: Vec<i64> = txs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_collaborator_failure_is_data_unavailable() {
        let analytics = Analytics::with_today(&FailingSource, &FailingSource, date(2026, 6, 1));
        let result = analytics.fetch(DateRange::new(date(2026, 1, 1), date(2026, 1, 31)));
        assert!(matches!(result, Err(Error::DataUnavailable(_))));
        assert!(matches!(analytics.names(), Err(Error::DataUnavailable(_))));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(&DateRange::new(date(2026, 1, 2), date(2026, 1, 1))).is_err());
        assert!(validate_range(&DateRange::new(date(2026, 1, 1), date(2026, 1, 1))).is_ok());
        assert!(matches!(
            validate_months("months", 0),
            Err(Error::InvalidRange(_))
        ));
    }
}
