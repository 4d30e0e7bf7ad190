//! Period Comparator
//!
//! Income/expense/savings deltas between two arbitrary date ranges, plus
//! per-category expense deltas over the union of categories seen in either.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::models::{
    CategoryDelta, Change, DateRange, PeriodComparison, PeriodSummary, Transaction,
};
use crate::source::CategoryNames;

use super::stats::{category_totals, percent_change, Totals};
use super::{validate_range, Analytics};

impl Analytics<'_> {
    /// Compare `first` against `second`; changes are measured from `first` to `second`
    pub fn compare_periods(
        &self,
        first: DateRange,
        second: DateRange,
        labels: (&str, &str),
    ) -> Result<PeriodComparison> {
        validate_range(&first)?;
        validate_range(&second)?;

        debug!(
            first_start = %first.start,
            first_end = %first.end,
            second_start = %second.start,
            second_end = %second.end,
            "Comparing periods"
        );

        let first_txs = self.fetch(first)?;
        let second_txs = self.fetch(second)?;
        let names = self.names()?;

        let comparison = build_comparison(
            (labels.0, first, &first_txs),
            (labels.1, second, &second_txs),
            &names,
        );

        debug!(categories = comparison.categories.len(), "Period comparison complete");
        Ok(comparison)
    }
}

fn summarize(label: &str, range: DateRange, transactions: &[Transaction]) -> PeriodSummary {
    let totals = Totals::from_transactions(transactions);
    PeriodSummary {
        label: label.to_string(),
        range,
        income: totals.income,
        expenses: totals.expenses(),
        savings: totals.savings,
        net_cash_flow: totals.net_cash_flow(),
        transaction_count: totals.count,
    }
}

fn change(from: f64, to: f64) -> Change {
    Change {
        absolute: to - from,
        percent: percent_change(to, from),
    }
}

fn build_comparison(
    first: (&str, DateRange, &[Transaction]),
    second: (&str, DateRange, &[Transaction]),
    names: &CategoryNames,
) -> PeriodComparison {
    let first_summary = summarize(first.0, first.1, first.2);
    let second_summary = summarize(second.0, second.1, second.2);

    let is_expense = |t: &Transaction| t.transaction_type.is_expense();
    let first_categories = category_totals(first.2, is_expense);
    let second_categories = category_totals(second.2, is_expense);

    let keys: BTreeSet<_> = first_categories
        .keys()
        .chain(second_categories.keys())
        .copied()
        .collect();

    let mut categories: Vec<CategoryDelta> = keys
        .into_iter()
        .map(|key| {
            let first_amount = first_categories.get(&key).map_or(0.0, |(a, _)| *a);
            let second_amount = second_categories.get(&key).map_or(0.0, |(a, _)| *a);
            CategoryDelta {
                category: key,
                category_name: names.name(key),
                first_amount,
                second_amount,
                change: second_amount - first_amount,
                percent_change: percent_change(second_amount, first_amount),
            }
        })
        .collect();

    categories.sort_by(|a, b| {
        b.change
            .abs()
            .partial_cmp(&a.change.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });

    PeriodComparison {
        income_change: change(first_summary.income, second_summary.income),
        expense_change: change(first_summary.expenses, second_summary.expenses),
        savings_change: change(first_summary.savings, second_summary.savings),
        first: first_summary,
        second: second_summary,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::CategoryKey;
    use crate::source::MemoryStore;
    use crate::test_utils::{
        categories, date, expense, fixed_expense, income, reference_date, savings, FailingSource,
    };

    fn store() -> MemoryStore {
        MemoryStore::new(
            vec![
                // May
                income(1, date(2026, 5, 1), 4000.0),
                fixed_expense(2, date(2026, 5, 2), 1200.0, Some(1)),
                expense(3, date(2026, 5, 9), 300.0, Some(2)),
                savings(4, date(2026, 5, 28), 500.0),
                // June
                income(5, date(2026, 6, 1), 5000.0),
                fixed_expense(6, date(2026, 6, 2), 1200.0, Some(1)),
                expense(7, date(2026, 6, 10), 100.0, Some(2)),
                expense(8, date(2026, 6, 11), 450.0, Some(3)),
            ],
            categories(&[(1, "Rent"), (2, "Dining"), (3, "Travel")]),
        )
    }

    fn may() -> DateRange {
        DateRange::new(date(2026, 5, 1), date(2026, 5, 31))
    }

    fn june() -> DateRange {
        DateRange::new(date(2026, 6, 1), date(2026, 6, 30))
    }

    #[test]
    fn test_period_totals_and_changes() {
        let store = store();
        let comparison = Analytics::with_today(&store, &store, reference_date())
            .compare_periods(may(), june(), ("May", "June"))
            .unwrap();

        assert_eq!(comparison.first.label, "May");
        assert_eq!(comparison.first.income, 4000.0);
        assert_eq!(comparison.first.expenses, 1500.0);
        assert_eq!(comparison.first.savings, 500.0);
        assert_eq!(comparison.second.expenses, 1750.0);

        assert_eq!(comparison.income_change.absolute, 1000.0);
        assert_eq!(comparison.income_change.percent, 25.0);
        // Savings fell to zero
        assert_eq!(comparison.savings_change.percent, -100.0);
    }

    #[test]
    fn test_category_union_sorted_by_absolute_change() {
        let store = store();
        let comparison = Analytics::with_today(&store, &store, reference_date())
            .compare_periods(may(), june(), ("May", "June"))
            .unwrap();

        let order: Vec<&str> = comparison
            .categories
            .iter()
            .map(|c| c.category_name.as_str())
            .collect();
        // Travel +450, Dining -200, Rent 0
        assert_eq!(order, vec!["Travel", "Dining", "Rent"]);

        let travel = &comparison.categories[0];
        assert_eq!(travel.category, CategoryKey::Category(3));
        assert_eq!(travel.first_amount, 0.0);
        // New category: zero baseline gives zero percent
        assert_eq!(travel.percent_change, 0.0);
    }

    #[test]
    fn test_zero_baseline_period() {
        let store = store();
        let empty = DateRange::new(date(2020, 1, 1), date(2020, 1, 31));
        let comparison = Analytics::with_today(&store, &store, reference_date())
            .compare_periods(empty, june(), ("Then", "Now"))
            .unwrap();
        assert_eq!(comparison.income_change.percent, 0.0);
        assert_eq!(comparison.expense_change.percent, 0.0);
        assert_eq!(comparison.expense_change.absolute, 1750.0);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let store = store();
        let reversed = DateRange::new(date(2026, 6, 30), date(2026, 6, 1));
        let result = Analytics::with_today(&store, &store, reference_date())
            .compare_periods(may(), reversed, ("a", "b"));
        assert!(matches!(result, Err(Error::InvalidRange(_))));
    }

    #[test]
    fn test_source_failure_propagates() {
        let result = Analytics::with_today(&FailingSource, &FailingSource, reference_date())
            .compare_periods(may(), june(), ("a", "b"));
        assert!(matches!(result, Err(Error::DataUnavailable(_))));
    }
}
