//! Data models for Cadence
//!
//! Input records (`Transaction`, `Category`) come from the collaborators and are
//! never mutated. Everything under "Computed Models" is built fresh per call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display name for transactions without a category
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Display name for category ids missing from the directory
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Kind of money movement a transaction represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    FixedExpense,
    VariableExpense,
    Transfer,
    Savings,
    Investment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::FixedExpense => "fixed_expense",
            Self::VariableExpense => "variable_expense",
            Self::Transfer => "transfer",
            Self::Savings => "savings",
            Self::Investment => "investment",
        }
    }

    /// Fixed and variable expenses are the only types counted as spending
    pub fn is_expense(&self) -> bool {
        matches!(self, Self::FixedExpense | Self::VariableExpense)
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "income" => Ok(Self::Income),
            "fixed_expense" => Ok(Self::FixedExpense),
            "variable_expense" => Ok(Self::VariableExpense),
            "transfer" => Ok(Self::Transfer),
            "savings" => Ok(Self::Savings),
            "investment" => Ok(Self::Investment),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction as provided by the transaction source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    /// Signed or magnitude depending on the source; aggregation uses `abs()`
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Grouping key for this transaction's category
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::from(self.category_id)
    }
}

/// A category as provided by the category directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Grouping key for per-category aggregation
///
/// Null category ids map to `Uncategorized` instead of being used as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    Category(i64),
    Uncategorized,
}

impl From<Option<i64>> for CategoryKey {
    fn from(id: Option<i64>) -> Self {
        match id {
            Some(id) => Self::Category(id),
            None => Self::Uncategorized,
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

// ========== Computed Models ==========

/// Interval regularity of a category's transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Irregular,
}

impl Periodicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Irregular => "irregular",
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pattern-level trend direction (first half vs second half of the window)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month-over-month direction of a trend point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stable,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recurring spending behaviour of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPattern {
    pub category: CategoryKey,
    pub category_name: String,
    pub avg_amount: f64,
    pub frequency_per_month: f64,
    pub is_recurring: bool,
    pub periodicity: Periodicity,
    pub total_amount: f64,
    pub transaction_count: usize,
    pub trend: TrendDirection,
}

/// Expense total of one calendar month against its predecessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// "YYYY-MM"
    pub period: String,
    pub current_value: f64,
    pub previous_value: f64,
    pub percent_change: f64,
    pub direction: Direction,
}

/// Forecast for one category in one future month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPrediction {
    pub category: CategoryKey,
    pub category_name: String,
    pub predicted_amount: f64,
    /// Heuristic weighting in [0, 1], not a calibrated probability
    pub confidence: f64,
    pub trend: TrendDirection,
}

/// Forecast for one transaction type in one future month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypePrediction {
    pub transaction_type: TransactionType,
    pub predicted_amount: f64,
    pub confidence: f64,
    pub observed_transactions: usize,
}

/// Forecast for one future month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPrediction {
    /// "YYYY-MM"
    pub month: String,
    /// 1-based offset from the current month
    pub months_ahead: u32,
    pub predicted_total: f64,
    pub categories: Vec<CategoryPrediction>,
    pub types: Vec<TypePrediction>,
}

/// Absolute and relative change between two values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub absolute: f64,
    pub percent: f64,
}

/// Income/expense/savings totals of one labelled period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub label: String,
    pub range: DateRange,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub net_cash_flow: f64,
    pub transaction_count: usize,
}

/// Expense change of one category between two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: CategoryKey,
    pub category_name: String,
    pub first_amount: f64,
    pub second_amount: f64,
    pub change: f64,
    pub percent_change: f64,
}

/// Comparison of two arbitrary periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub first: PeriodSummary,
    pub second: PeriodSummary,
    pub income_change: Change,
    pub expense_change: Change,
    pub savings_change: Change,
    /// Sorted by absolute change, largest first
    pub categories: Vec<CategoryDelta>,
}

/// A category's share of some total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: CategoryKey,
    pub category_name: String,
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Calendar month report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
    pub total_expenses: f64,
    pub savings: f64,
    pub net_cash_flow: f64,
    /// Top expense categories with share of total expenses
    pub top_categories: Vec<CategoryAmount>,
    pub trends: Vec<TrendPoint>,
    pub transaction_count: usize,
    /// Mean of |amount| over all transactions in the month
    pub average_transaction_amount: f64,
}

/// One month of an annual report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBreakdown {
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub net_cash_flow: f64,
}

/// Year-over-year deltas against the previous calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    pub previous_year: i32,
    pub previous_income: f64,
    pub previous_expenses: f64,
    pub previous_savings: f64,
    pub income_change: f64,
    pub expense_change: f64,
    pub savings_change: f64,
}

/// Calendar year report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualReport {
    pub year: i32,
    pub income: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
    pub total_expenses: f64,
    pub savings: f64,
    pub net_cash_flow: f64,
    /// Always 12 entries, January first
    pub months: Vec<MonthBreakdown>,
    /// Share of total transacted amount, not expenses only
    pub categories: Vec<CategoryAmount>,
    /// Absent when the previous year has no transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_over_year: Option<YearOverYear>,
    pub transaction_count: usize,
    pub average_transaction_amount: f64,
}

/// Headline totals of an executive summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub net_cash_flow: f64,
    /// savings / income * 100, 0 when there is no income
    pub savings_rate: f64,
    pub transaction_count: usize,
}

/// Net cash flow of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    /// "YYYY-MM"
    pub period: String,
    pub income: f64,
    pub expenses: f64,
    pub net_cash_flow: f64,
}

/// Narrative summary of an arbitrary range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub range: DateRange,
    pub overview: Overview,
    pub highlights: Vec<String>,
    pub concerns: Vec<String>,
    pub top_categories: Vec<CategoryAmount>,
    pub cash_flow: Vec<CashFlowPoint>,
    /// Best effort; missing when the forecast could not be produced
    pub forecast: Option<SpendingPrediction>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!(
            TransactionType::from_str("fixed_expense").unwrap(),
            TransactionType::FixedExpense
        );
        assert_eq!(
            TransactionType::from_str("Variable-Expense").unwrap(),
            TransactionType::VariableExpense
        );
        assert!(TransactionType::from_str("refund").is_err());
    }

    #[test]
    fn test_only_fixed_and_variable_are_expenses() {
        assert!(TransactionType::FixedExpense.is_expense());
        assert!(TransactionType::VariableExpense.is_expense());
        assert!(!TransactionType::Income.is_expense());
        assert!(!TransactionType::Savings.is_expense());
        assert!(!TransactionType::Transfer.is_expense());
    }

    #[test]
    fn test_category_key_sentinel() {
        assert_eq!(CategoryKey::from(None), CategoryKey::Uncategorized);
        assert_eq!(CategoryKey::from(Some(4)), CategoryKey::Category(4));
        // Uncategorized sorts after every real category
        assert!(CategoryKey::Category(i64::MAX) < CategoryKey::Uncategorized);
    }

    #[test]
    fn test_transaction_json_shape() {
        let json = r#"{"id":1,"date":"2026-03-01","amount":-12.5,"type":"variable_expense"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::VariableExpense);
        assert_eq!(tx.category_key(), CategoryKey::Uncategorized);
        assert!(tx.description.is_none());
    }
}
