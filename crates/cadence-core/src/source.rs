//! Read-only collaborators the analytics engine depends on
//!
//! The engine never owns storage. It is handed a `TransactionSource` and a
//! `CategoryDirectory` and fetches one snapshot per operation.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Category, CategoryKey, Transaction, UNCATEGORIZED_NAME, UNKNOWN_CATEGORY_NAME};

/// Provider of transaction records
pub trait TransactionSource: Send + Sync {
    /// Transactions dated within `[start, end]`, in no particular order.
    ///
    /// Returns an empty list when nothing matches; errors only when the
    /// underlying store is unavailable.
    fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>>;
}

/// Provider of category id to name lookups
pub trait CategoryDirectory: Send + Sync {
    fn get_all(&self) -> Result<Vec<Category>>;
}

/// Immutable in-memory snapshot implementing both collaborators
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

impl MemoryStore {
    pub fn new(transactions: Vec<Transaction>, categories: Vec<Category>) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

impl TransactionSource for MemoryStore {
    fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .cloned()
            .collect())
    }
}

impl CategoryDirectory for MemoryStore {
    fn get_all(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

/// Category id to display name lookup built from a directory snapshot
#[derive(Debug, Clone, Default)]
pub struct CategoryNames {
    names: HashMap<i64, String>,
}

impl CategoryNames {
    pub fn load(directory: &dyn CategoryDirectory) -> Result<Self> {
        Ok(Self::from_categories(&directory.get_all()?))
    }

    pub fn from_categories(categories: &[Category]) -> Self {
        Self {
            names: categories.iter().map(|c| (c.id, c.name.clone())).collect(),
        }
    }

    pub fn name(&self, key: CategoryKey) -> String {
        match key {
            CategoryKey::Category(id) => self
                .names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string()),
            CategoryKey::Uncategorized => UNCATEGORIZED_NAME.to_string(),
        }
    }
}
