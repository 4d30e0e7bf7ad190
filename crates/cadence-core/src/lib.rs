//! Cadence Core Library
//!
//! Read-only spending analytics over a snapshot of transactions:
//! - Pattern detection (frequency, periodicity, trend) per category
//! - Month-over-month expense trends
//! - Trend-adjusted spending forecasts
//! - Period comparisons
//! - Monthly, annual and executive reports
//! - Keyword-based category suggestions
//! - CSV/JSON snapshot loading and settings

pub mod analytics;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod source;

/// Test utilities: fixture builders and a failing collaborator
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::Analytics;
pub use config::Settings;
pub use error::{Error, Result};
pub use import::{load_store, parse_categories_csv, parse_transactions_csv};
pub use models::{
    AnnualReport, Category, CategoryKey, DateRange, ExecutiveSummary, MonthlyReport,
    PeriodComparison, SpendingPattern, SpendingPrediction, Transaction, TransactionType,
    TrendPoint,
};
pub use source::{CategoryDirectory, CategoryNames, MemoryStore, TransactionSource};
