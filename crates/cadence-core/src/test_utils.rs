//! Test utilities for cadence-core
//!
//! Fixture builders and a failing collaborator, shared by unit tests,
//! integration tests and the CLI tests (via the `test-utils` feature).

use chrono::{Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{Category, Transaction, TransactionType};
use crate::source::{CategoryDirectory, TransactionSource};

/// Fixed "today" used by analytics tests (mid-month, mid-year)
pub fn reference_date() -> NaiveDate {
    date(2026, 6, 15)
}

/// Shorthand for a calendar date; panics on invalid input
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// `days` days before `anchor`
pub fn days_before(anchor: NaiveDate, days: i64) -> NaiveDate {
    anchor - Duration::days(days)
}

/// Builder for test transactions
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    pub fn new(id: i64, date: NaiveDate, amount: f64, transaction_type: TransactionType) -> Self {
        Self {
            tx: Transaction {
                id,
                date,
                amount,
                transaction_type,
                category_id: None,
                description: None,
            },
        }
    }

    pub fn category(mut self, id: i64) -> Self {
        self.tx.category_id = Some(id);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.tx.description = Some(description.to_string());
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

/// Variable expense stored as a negative amount
pub fn expense(id: i64, date: NaiveDate, amount: f64, category: Option<i64>) -> Transaction {
    let mut tx =
        TransactionBuilder::new(id, date, -amount.abs(), TransactionType::VariableExpense).build();
    tx.category_id = category;
    tx
}

/// Fixed expense stored as a negative amount
pub fn fixed_expense(id: i64, date: NaiveDate, amount: f64, category: Option<i64>) -> Transaction {
    let mut tx =
        TransactionBuilder::new(id, date, -amount.abs(), TransactionType::FixedExpense).build();
    tx.category_id = category;
    tx
}

pub fn income(id: i64, date: NaiveDate, amount: f64) -> Transaction {
    TransactionBuilder::new(id, date, amount, TransactionType::Income).build()
}

pub fn savings(id: i64, date: NaiveDate, amount: f64) -> Transaction {
    TransactionBuilder::new(id, date, amount, TransactionType::Savings).build()
}

pub fn categories(entries: &[(i64, &str)]) -> Vec<Category> {
    entries
        .iter()
        .map(|(id, name)| Category {
            id: *id,
            name: name.to_string(),
        })
        .collect()
}

/// Collaborator whose every call fails, for `DataUnavailable` paths
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSource;

impl TransactionSource for FailingSource {
    fn get_by_date_range(&self, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<Transaction>> {
        Err(Error::DataUnavailable("transaction store offline".into()))
    }
}

impl CategoryDirectory for FailingSource {
    fn get_all(&self) -> Result<Vec<Category>> {
        Err(Error::DataUnavailable("category store offline".into()))
    }
}
