//! Category Suggester
//!
//! Guesses a category for a new description by keyword overlap with the
//! descriptions of already-categorized transactions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::models::{Category, CategoryKey, DateRange, Transaction};
use crate::source::CategoryNames;

use super::Analytics;

/// Shortest token that counts toward overlap
const MIN_TOKEN_LEN: usize = 3;

impl Analytics<'_> {
    /// Most likely category for `description`, or `None` without any overlap
    ///
    /// `amount` does not influence the score.
    pub fn suggest_category(&self, description: &str, _amount: f64) -> Result<Option<Category>> {
        let candidate = tokenize(description);
        if candidate.is_empty() {
            return Ok(None);
        }

        let history = self.fetch(DateRange::new(NaiveDate::MIN, self.today))?;
        let names = self.names()?;

        let suggestion = best_category(&candidate, &history, &names);
        debug!(
            tokens = candidate.len(),
            history = history.len(),
            suggested = ?suggestion.as_ref().map(|c| c.id),
            "Category suggestion"
        );
        Ok(suggestion)
    }
}

/// Lowercased whitespace tokens with edge punctuation stripped
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

fn overlap(history_tokens: &[String], candidate: &[String]) -> usize {
    history_tokens
        .iter()
        .filter(|h| {
            candidate
                .iter()
                .any(|c| h.contains(c.as_str()) || c.contains(h.as_str()))
        })
        .count()
}

fn best_category(
    candidate: &[String],
    history: &[Transaction],
    names: &CategoryNames,
) -> Option<Category> {
    let mut scores: BTreeMap<i64, usize> = BTreeMap::new();
    for tx in history {
        let (Some(category_id), Some(description)) = (tx.category_id, tx.description.as_deref())
        else {
            continue;
        };
        let score = overlap(&tokenize(description), candidate);
        if score > 0 {
            *scores.entry(category_id).or_insert(0) += score;
        }
    }

    // Ascending id iteration plus strict `>` keeps the lowest id on ties
    let mut best: Option<(i64, usize)> = None;
    for (id, score) in scores {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((id, score));
        }
    }

    best.map(|(id, _)| Category {
        id,
        name: names.name(CategoryKey::Category(id)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::TransactionType;
    use crate::source::MemoryStore;
    use crate::test_utils::{categories, date, reference_date, FailingSource, TransactionBuilder};

    fn described(id: i64, category: i64, description: &str) -> Transaction {
        TransactionBuilder::new(id, date(2026, 3, 1), -20.0, TransactionType::VariableExpense)
            .category(category)
            .description(description)
            .build()
    }

    fn store() -> MemoryStore {
        MemoryStore::new(
            vec![
                described(1, 1, "Whole Foods Market"),
                described(2, 1, "Trader Joe's groceries"),
                described(3, 2, "Shell gas station"),
                described(4, 2, "Chevron gas"),
                TransactionBuilder::new(5, date(2026, 3, 2), -5.0, TransactionType::VariableExpense)
                    .description("market stall")
                    .build(),
            ],
            categories(&[(1, "Groceries"), (2, "Fuel")]),
        )
    }

    fn suggest(store: &MemoryStore, description: &str) -> Option<Category> {
        Analytics::with_today(store, store, reference_date())
            .suggest_category(description, 42.0)
            .unwrap()
    }

    #[test]
    fn test_suggests_best_overlap() {
        let store = store();
        let fuel = suggest(&store, "SHELL station #42").unwrap();
        assert_eq!(fuel.id, 2);
        assert_eq!(fuel.name, "Fuel");

        let groceries = suggest(&store, "foods market downtown").unwrap();
        assert_eq!(groceries.name, "Groceries");
    }

    #[test]
    fn test_substring_matches_both_ways() {
        let store = store();
        // "grocer" is contained in "groceries"
        assert_eq!(suggest(&store, "grocer").unwrap().id, 1);
        // "chevrons" contains "chevron"
        assert_eq!(suggest(&store, "chevrons").unwrap().id, 2);
    }

    #[test]
    fn test_no_overlap_or_empty_description() {
        let store = store();
        assert!(suggest(&store, "").is_none());
        assert!(suggest(&store, "   ").is_none());
        assert!(suggest(&store, "airline tickets").is_none());
        // Short tokens never match
        assert!(suggest(&store, "go to").is_none());
    }

    #[test]
    fn test_tie_goes_to_lowest_id() {
        let store = MemoryStore::new(
            vec![described(1, 7, "coffee beans"), described(2, 3, "coffee shop")],
            categories(&[(3, "Cafe"), (7, "Groceries")]),
        );
        assert_eq!(suggest(&store, "coffee").unwrap().id, 3);
    }

    #[test]
    fn test_future_history_ignored() {
        let store = MemoryStore::new(
            vec![TransactionBuilder::new(1, date(2027, 1, 1), -9.0, TransactionType::VariableExpense)
                .category(1)
                .description("bookstore")
                .build()],
            categories(&[(1, "Books")]),
        );
        assert!(suggest(&store, "bookstore").is_none());
    }

    #[test]
    fn test_history_before_1970_counts() {
        let store = MemoryStore::new(
            vec![TransactionBuilder::new(1, date(1965, 7, 4), -12.0, TransactionType::VariableExpense)
                .category(4)
                .description("Hardware store nails")
                .build()],
            categories(&[(4, "Home")]),
        );
        let home = suggest(&store, "hardware").unwrap();
        assert_eq!(home.id, 4);
        assert_eq!(home.name, "Home");
    }

    #[test]
    fn test_empty_description_skips_fetch() {
        let analytics = Analytics::with_today(&FailingSource, &FailingSource, reference_date());
        assert!(analytics.suggest_category("", 10.0).unwrap().is_none());
        assert!(matches!(
            analytics.suggest_category("rent", 10.0),
            Err(Error::DataUnavailable(_))
        ));
    }
}
