//! Trend Engine
//!
//! Month-over-month expense totals for a run of calendar months.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{DateRange, Direction, Transaction, TrendPoint};

use super::stats::{month_end, month_label, month_start, percent_change, shift_month};
use super::{validate_months, Analytics};

/// Month-over-month change (percent) needed to call a direction
const DIRECTION_THRESHOLD_PERCENT: f64 = 5.0;

impl Analytics<'_> {
    /// Expense trend for the `months_back` months ending with the current one, oldest first
    pub fn analyze_trends(&self, months_back: u32) -> Result<Vec<TrendPoint>> {
        validate_months("months back", months_back)?;
        self.trends_ending(self.today.year(), self.today.month(), months_back)
    }

    /// Expense trend for the `months_back` months ending with `year`-`month`
    pub(crate) fn trends_ending(
        &self,
        year: i32,
        month: u32,
        months_back: u32,
    ) -> Result<Vec<TrendPoint>> {
        let span = i32::try_from(months_back)
            .map_err(|_| Error::InvalidRange(format!("{} months back is too far", months_back)))?;

        // Include the predecessor of the oldest month as its baseline
        let (first_year, first_month) = shift_month(year, month, -span);
        let range = DateRange::new(month_start(first_year, first_month)?, month_end(year, month)?);

        debug!(months_back, start = %range.start, end = %range.end, "Analyzing trends");

        let transactions = self.fetch(range)?;
        let points = trend_points(&transactions, year, month, span);

        debug!(points = points.len(), "Trend analysis complete");
        Ok(points)
    }
}

/// Build trend points for `span` months ending at `year`-`month`
pub(crate) fn trend_points(
    transactions: &[Transaction],
    year: i32,
    month: u32,
    span: i32,
) -> Vec<TrendPoint> {
    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.transaction_type.is_expense()) {
        *monthly.entry((tx.date.year(), tx.date.month())).or_insert(0.0) += tx.amount.abs();
    }
    let total_for = |key: (i32, u32)| monthly.get(&key).copied().unwrap_or(0.0);

    (0..span)
        .rev()
        .map(|offset| {
            let (y, m) = shift_month(year, month, -offset);
            let current_value = total_for((y, m));
            let previous_value = total_for(shift_month(y, m, -1));
            let percent_change = percent_change(current_value, previous_value);

            TrendPoint {
                period: month_label(y, m),
                current_value,
                previous_value,
                percent_change,
                direction: direction_for(percent_change),
            }
        })
        .collect()
}

fn direction_for(percent_change: f64) -> Direction {
    if percent_change > DIRECTION_THRESHOLD_PERCENT {
        Direction::Up
    } else if percent_change < -DIRECTION_THRESHOLD_PERCENT {
        Direction::Down
    } else {
        Direction::Stable
    }
}
