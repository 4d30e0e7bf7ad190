//! Pattern Analyzer
//!
//! Groups expense transactions by category over a trailing window and
//! characterises each group:
//! - total/average amount and frequency per month
//! - periodicity from the mean and spread of day intervals
//! - trend from first-half vs second-half totals

use std::collections::BTreeMap;

use chrono::{Duration, Months, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CategoryKey, DateRange, Periodicity, SpendingPattern, Transaction, TrendDirection};
use crate::source::CategoryNames;

use super::stats::{mean_std_dev, percent_change};
use super::{validate_months, Analytics};

/// Minimum occurrences per month for a periodic category to count as recurring
const RECURRING_MIN_FREQUENCY: f64 = 0.8;

/// Half-over-half change (percent) needed to call a trend
const TREND_THRESHOLD_PERCENT: f64 = 10.0;

/// Allowed interval spread, as a fraction of the mean interval
const INTERVAL_TOLERANCE: f64 = 0.3;

impl Analytics<'_> {
    /// Spending patterns over the trailing `months` months, largest total first
    pub fn analyze_patterns(&self, months: u32) -> Result<Vec<SpendingPattern>> {
        validate_months("months to analyze", months)?;

        let window = pattern_window(self.today, months)?;
        debug!(
            months,
            start = %window.start,
            end = %window.end,
            "Analyzing spending patterns"
        );

        let transactions = self.fetch(window)?;
        let names = self.names()?;
        let patterns = detect_patterns(&transactions, window, months, &names);

        debug!(
            months,
            transactions = transactions.len(),
            patterns = patterns.len(),
            "Pattern analysis complete"
        );
        Ok(patterns)
    }
}

/// Trailing window of `months` calendar months ending today
pub(crate) fn pattern_window(today: NaiveDate, months: u32) -> Result<DateRange> {
    let start = today
        .checked_sub_months(Months::new(months))
        .ok_or_else(|| Error::InvalidRange(format!("{} months back is out of range", months)))?;
    Ok(DateRange::new(start, today))
}

/// Build patterns for the expense transactions of `transactions` that fall in `window`
pub(crate) fn detect_patterns(
    transactions: &[Transaction],
    window: DateRange,
    months: u32,
    names: &CategoryNames,
) -> Vec<SpendingPattern> {
    let mut groups: BTreeMap<CategoryKey, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.transaction_type.is_expense() && window.contains(t.date))
    {
        groups.entry(tx.category_key()).or_default().push(tx);
    }

    let mut patterns: Vec<SpendingPattern> = groups
        .into_iter()
        .map(|(key, txs)| build_pattern(key, &txs, window, months, names))
        .collect();

    patterns.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });

    patterns
}

fn build_pattern(
    key: CategoryKey,
    transactions: &[&Transaction],
    window: DateRange,
    months: u32,
    names: &CategoryNames,
) -> SpendingPattern {
    let total_amount: f64 = transactions.iter().map(|t| t.amount.abs()).sum();
    let count = transactions.len();
    let avg_amount = if count > 0 {
        total_amount / count as f64
    } else {
        0.0
    };
    let frequency_per_month = count as f64 / months as f64;

    let dates: Vec<NaiveDate> = transactions.iter().map(|t| t.date).collect();
    let periodicity = classify_periodicity(&dates);
    let is_recurring =
        periodicity != Periodicity::Irregular && frequency_per_month >= RECURRING_MIN_FREQUENCY;

    SpendingPattern {
        category: key,
        category_name: names.name(key),
        avg_amount,
        frequency_per_month,
        is_recurring,
        periodicity,
        total_amount,
        transaction_count: count,
        trend: window_trend(transactions, window),
    }
}

/// Classify the regularity of a set of transaction dates
///
/// Fewer than two dates is always irregular.
pub fn classify_periodicity(dates: &[NaiveDate]) -> Periodicity {
    if dates.len() < 2 {
        return Periodicity::Irregular;
    }

    let mut sorted = dates.to_vec();
    sorted.sort();

    let intervals: Vec<f64> = sorted
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days() as f64)
        .collect();

    let (mean, std_dev) = mean_std_dev(&intervals);
    let consistent = std_dev < INTERVAL_TOLERANCE * mean;

    if mean <= 2.0 && std_dev < 1.0 {
        Periodicity::Daily
    } else if (5.0..=9.0).contains(&mean) && consistent {
        Periodicity::Weekly
    } else if (12.0..=16.0).contains(&mean) && consistent {
        Periodicity::Biweekly
    } else if (25.0..=35.0).contains(&mean) && consistent {
        Periodicity::Monthly
    } else {
        Periodicity::Irregular
    }
}

/// Compare spending before and after the window's temporal midpoint
fn window_trend(transactions: &[&Transaction], window: DateRange) -> TrendDirection {
    let midpoint = window.start + Duration::days((window.end - window.start).num_days() / 2);

    let (first, second) = transactions
        .iter()
        .fold((0.0, 0.0), |(first, second), tx| {
            if tx.date < midpoint {
                (first + tx.amount.abs(), second)
            } else {
                (first, second + tx.amount.abs())
            }
        });

    let change = percent_change(second, first);
    if change > TREND_THRESHOLD_PERCENT {
        TrendDirection::Increasing
    } else if change < -TREND_THRESHOLD_PERCENT {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}
