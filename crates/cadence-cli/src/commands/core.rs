//! Shared command utilities
//!
//! This module contains:
//! - `load_settings` - Resolve the settings file
//! - `open_store` - Load the transaction snapshot named on the command line or in settings
//! - `reference_date` / `parse_date` - Date argument handling
//! - `print_json` - `--json` output

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::{load_store, MemoryStore, Settings};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

/// Load settings from `--config`, the data-dir override, or the embedded defaults
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    Settings::load(config).context("Failed to load settings")
}

/// Load the snapshot, preferring command-line paths over settings
pub fn open_store(
    settings: &Settings,
    transactions: Option<&Path>,
    categories: Option<&Path>,
) -> Result<MemoryStore> {
    let transactions = transactions
        .or(settings.transactions_path.as_deref())
        .context(
            "No transactions file. Pass --transactions or set `transactions` under [data] in the settings file",
        )?;
    let categories = categories.or(settings.categories_path.as_deref());

    debug!(
        "Opening snapshot {} (categories: {})",
        transactions.display(),
        categories
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    load_store(transactions, categories)
        .with_context(|| format!("Failed to load {}", transactions.display()))
}

/// Parse a YYYY-MM-DD argument
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// `--today` if given, otherwise the current UTC date
pub fn reference_date(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(value) => parse_date(value, "--today"),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
