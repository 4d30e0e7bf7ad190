//! Shared arithmetic and calendar helpers
//!
//! Every division here guards its denominator and yields 0 instead of NaN.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{CategoryAmount, CategoryKey, Transaction, TransactionType};
use crate::source::CategoryNames;

/// Percent change from `previous` to `current`; 0 when the baseline is 0
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// `part / whole * 100`, 0 when `whole` is 0
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Mean and population standard deviation
pub fn mean_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Shift a (year, month) pair by `delta` months
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// First day of a calendar month
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidRange(format!("Invalid month: {}-{:02}", year, month)))
}

/// Last day of a calendar month
pub fn month_end(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = shift_month(year, month, 1);
    Ok(month_start(next_year, next_month)? - Duration::days(1))
}

/// "YYYY-MM"
pub fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Calendar months touched by `[start, end]`, oldest first
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while (year, month) <= (end.year(), end.month()) {
        months.push((year, month));
        (year, month) = shift_month(year, month, 1);
    }
    months
}

/// Type-level totals over a set of transactions (absolute amounts)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
    pub savings: f64,
    /// Sum of |amount| over every transaction, whatever its type
    pub transacted: f64,
    pub count: usize,
}

impl Totals {
    pub fn from_transactions<'t>(transactions: impl IntoIterator<Item = &'t Transaction>) -> Self {
        let mut totals = Self::default();
        for tx in transactions {
            let amount = tx.amount.abs();
            match tx.transaction_type {
                TransactionType::Income => totals.income += amount,
                TransactionType::FixedExpense => totals.fixed_expenses += amount,
                TransactionType::VariableExpense => totals.variable_expenses += amount,
                TransactionType::Savings => totals.savings += amount,
                TransactionType::Transfer | TransactionType::Investment => {}
            }
            totals.transacted += amount;
            totals.count += 1;
        }
        totals
    }

    pub fn expenses(&self) -> f64 {
        self.fixed_expenses + self.variable_expenses
    }

    pub fn net_cash_flow(&self) -> f64 {
        self.income - self.expenses()
    }

    /// Mean |amount| over all transactions
    pub fn average_amount(&self) -> f64 {
        if self.count > 0 {
            self.transacted / self.count as f64
        } else {
            0.0
        }
    }
}

/// Per-category (|amount| sum, count) for transactions passing `include`
pub fn category_totals<'t>(
    transactions: impl IntoIterator<Item = &'t Transaction>,
    include: impl Fn(&Transaction) -> bool,
) -> BTreeMap<CategoryKey, (f64, usize)> {
    let mut totals: BTreeMap<CategoryKey, (f64, usize)> = BTreeMap::new();
    for tx in transactions.into_iter().filter(|t| include(t)) {
        let entry = totals.entry(tx.category_key()).or_insert((0.0, 0));
        entry.0 += tx.amount.abs();
        entry.1 += 1;
    }
    totals
}

/// Rank category totals by amount (largest first, ties by key) with their share of `whole`
pub fn rank_categories(
    totals: &BTreeMap<CategoryKey, (f64, usize)>,
    whole: f64,
    names: &CategoryNames,
    limit: Option<usize>,
) -> Vec<CategoryAmount> {
    let mut ranked: Vec<CategoryAmount> = totals
        .iter()
        .map(|(key, (amount, count))| CategoryAmount {
            category: *key,
            category_name: names.name(*key),
            amount: *amount,
            percentage: percentage(*amount, whole),
            transaction_count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change_zero_baseline() {
        assert_eq!(percent_change(500.0, 0.0), 0.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
    }

    #[test]
    fn test_mean_std_dev() {
        let (mean, sd) = mean_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(mean, 5.0);
        assert_eq!(sd, 2.0);
        assert_eq!(mean_std_dev(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_shift_month_across_years() {
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 3, -14), (2025, 1));
        assert_eq!(shift_month(2026, 6, 0), (2026, 6));
    }

    #[test]
    fn test_month_end() {
        assert_eq!(
            month_end(2024, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            month_end(2025, 12).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
        assert!(month_start(2025, 13).is_err());
    }

    #[test]
    fn test_months_between() {
        let months = months_between(
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
        );
        assert_eq!(months, vec![(2025, 11), (2025, 12), (2026, 1), (2026, 2)]);
    }
}
