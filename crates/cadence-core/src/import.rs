//! Snapshot loaders for transaction and category files
//!
//! Supported formats:
//! - Transactions CSV: `id,date,amount,type,category_id,description`
//! - Categories CSV: `id,name`
//! - JSON snapshot: `{"categories": [...], "transactions": [...]}`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Category, Transaction, TransactionType};
use crate::source::MemoryStore;

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Read a required column, trimming whitespace
fn field<'r>(record: &'r StringRecord, index: usize, name: &str, row: usize) -> Result<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| Error::Import(format!("Row {}: missing {}", row, name)))
}

/// Read an optional column; empty strings count as missing
fn optional_field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a transactions CSV
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let row = i + 2;

        let id = field(&record, 0, "id", row)?
            .parse::<i64>()
            .map_err(|e| Error::Import(format!("Row {}: invalid id: {}", row, e)))?;

        let date_str = field(&record, 1, "date", row)?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| Error::Import(format!("Row {}: invalid date '{}': {}", row, date_str, e)))?;

        let amount = field(&record, 2, "amount", row)?
            .replace(['$', ','], "")
            .parse::<f64>()
            .map_err(|e| Error::Import(format!("Row {}: invalid amount: {}", row, e)))?;

        let transaction_type: TransactionType = field(&record, 3, "type", row)?
            .parse()
            .map_err(|e: String| Error::Import(format!("Row {}: {}", row, e)))?;

        let category_id = optional_field(&record, 4)
            .map(|s| {
                s.parse::<i64>()
                    .map_err(|e| Error::Import(format!("Row {}: invalid category_id: {}", row, e)))
            })
            .transpose()?;

        let description = optional_field(&record, 5).map(String::from);

        transactions.push(Transaction {
            id,
            date,
            amount,
            transaction_type,
            category_id,
            description,
        });
    }

    debug!("Parsed {} transactions from CSV", transactions.len());
    Ok(transactions)
}

/// Parse a categories CSV
pub fn parse_categories_csv<R: Read>(reader: R) -> Result<Vec<Category>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut categories = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 2;

        let id = field(&record, 0, "id", row)?
            .parse::<i64>()
            .map_err(|e| Error::Import(format!("Row {}: invalid id: {}", row, e)))?;
        let name = field(&record, 1, "name", row)?;
        if name.is_empty() {
            return Err(Error::Import(format!("Row {}: empty category name", row)));
        }

        categories.push(Category {
            id,
            name: name.to_string(),
        });
    }

    Ok(categories)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Load a snapshot from files
///
/// A `.json` transactions file is a full snapshot and may carry its own
/// categories; a separate categories file (CSV) replaces them when given.
pub fn load_store(transactions: &Path, categories: Option<&Path>) -> Result<MemoryStore> {
    let (txs, mut cats) = if is_json(transactions) {
        let snapshot: Snapshot = serde_json::from_reader(File::open(transactions)?)?;
        (snapshot.transactions, snapshot.categories)
    } else {
        (parse_transactions_csv(File::open(transactions)?)?, Vec::new())
    };

    if let Some(path) = categories {
        cats = if is_json(path) {
            serde_json::from_reader(File::open(path)?)?
        } else {
            parse_categories_csv(File::open(path)?)?
        };
    }

    debug!(
        "Loaded snapshot: {} transactions, {} categories",
        txs.len(),
        cats.len()
    );
    Ok(MemoryStore::new(txs, cats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transactions_csv() {
        let csv = "id,date,amount,type,category_id,description\n\
                   1,2026-01-05,-1000.00,fixed_expense,1,Monthly rent\n\
                   2,2026-01-06,\"$5,000.00\",income,,\n";
        let txs = parse_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].category_id, Some(1));
        assert_eq!(txs[0].description.as_deref(), Some("Monthly rent"));
        assert_eq!(txs[1].amount, 5000.0);
        assert_eq!(txs[1].transaction_type, TransactionType::Income);
        assert!(txs[1].category_id.is_none());
        assert!(txs[1].description.is_none());
    }

    #[test]
    fn test_parse_transactions_csv_bad_date() {
        let csv = "id,date,amount,type,category_id,description\n1,01/05/2026,-5,income,,\n";
        let err = parse_transactions_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_parse_transactions_csv_bad_type() {
        let csv = "id,date,amount,type,category_id,description\n1,2026-01-05,-5,refund,,\n";
        assert!(matches!(
            parse_transactions_csv(csv.as_bytes()),
            Err(Error::Import(_))
        ));
    }

    #[test]
    fn test_parse_categories_csv() {
        let csv = "id,name\n1,Rent\n2, Groceries \n";
        let cats = parse_categories_csv(csv.as_bytes()).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[1].name, "Groceries");
    }

    #[test]
    fn test_load_json_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"categories":[{"id":1,"name":"Rent"}],
                "transactions":[{"id":1,"date":"2026-01-01","amount":-900,"type":"fixed_expense","category_id":1}]}"#,
        )
        .unwrap();

        let store = load_store(&path, None).unwrap();
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.categories()[0].name, "Rent");
    }
}
