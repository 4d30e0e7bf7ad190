//! Integration tests for cadence-core
//!
//! These tests exercise the full snapshot load → analytics → report workflow.

use std::io::Write;

use cadence_core::{
    load_store,
    models::{Direction, Periodicity, TrendDirection},
    Analytics, CategoryKey, DateRange, Error, MemoryStore,
};
use chrono::NaiveDate;
use tempfile::NamedTempFile;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Half a year of household activity:
/// - Rent (fixed, 1000) on the 3rd of every month
/// - Groceries (variable) creeping upward
/// - Monthly paycheck, one savings transfer, one uncategorized transfer
fn household_csv() -> &'static str {
    r#"id,date,amount,type,category_id,description
1,2026-01-01,5000.00,income,,Paycheck
2,2026-02-01,5000.00,income,,Paycheck
3,2026-03-01,5000.00,income,,Paycheck
4,2026-04-01,5000.00,income,,Paycheck
5,2026-05-01,5000.00,income,,Paycheck
6,2026-06-01,5000.00,income,,Paycheck
7,2026-01-03,-1000.00,fixed_expense,1,Monthly rent
8,2026-02-03,-1000.00,fixed_expense,1,Monthly rent
9,2026-03-03,-1000.00,fixed_expense,1,Monthly rent
10,2026-04-03,-1000.00,fixed_expense,1,Monthly rent
11,2026-05-03,-1000.00,fixed_expense,1,Monthly rent
12,2026-06-03,-1000.00,fixed_expense,1,Monthly rent
13,2026-01-10,-120.00,variable_expense,2,Whole Foods Market
14,2026-02-12,-130.00,variable_expense,2,Whole Foods Market
15,2026-03-09,-110.00,variable_expense,2,Safeway groceries
16,2026-04-11,-125.00,variable_expense,2,Whole Foods Market
17,2026-05-10,-140.00,variable_expense,2,Safeway groceries
18,2026-06-08,-150.00,variable_expense,2,Whole Foods Market
19,2026-05-28,500.00,savings,,Emergency fund
20,2026-06-05,-200.00,transfer,,To checking"#
}

fn categories_csv() -> &'static str {
    "id,name\n1,Rent\n2,Groceries\n"
}

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn household_store() -> MemoryStore {
    let transactions = write_temp(household_csv(), ".csv");
    let categories = write_temp(categories_csv(), ".csv");
    load_store(transactions.path(), Some(categories.path())).expect("Failed to load snapshot")
}

fn today() -> NaiveDate {
    date(2026, 6, 15)
}

// =============================================================================
// Snapshot Loading
// =============================================================================

#[test]
fn test_load_csv_snapshot() {
    let store = household_store();
    assert_eq!(store.transactions().len(), 20);
    assert_eq!(store.categories().len(), 2);
}

#[test]
fn test_load_json_snapshot() {
    let json = r#"{
        "categories": [{"id": 9, "name": "Streaming"}],
        "transactions": [
            {"id": 1, "date": "2026-05-20", "amount": -15.49, "type": "variable_expense", "category_id": 9, "description": "NETFLIX.COM"},
            {"id": 2, "date": "2026-06-01", "amount": 3000, "type": "income"}
        ]
    }"#;
    let file = write_temp(json, ".json");
    let store = load_store(file.path(), None).expect("Failed to load JSON snapshot");

    let analytics = Analytics::with_today(&store, &store, today());
    let patterns = analytics.analyze_patterns(3).unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].category_name, "Streaming");
    assert_eq!(patterns[0].total_amount, 15.49);
}

#[test]
fn test_bad_csv_row_is_import_error() {
    let file = write_temp(
        "id,date,amount,type,category_id,description\n1,not-a-date,-5,income,,\n",
        ".csv",
    );
    assert!(matches!(load_store(file.path(), None), Err(Error::Import(_))));
}

// =============================================================================
// Analytics Workflow
// =============================================================================

#[test]
fn test_patterns_from_csv_snapshot() {
    let store = household_store();
    let analytics = Analytics::with_today(&store, &store, today());
    let patterns = analytics.analyze_patterns(6).unwrap();

    // Income, savings and transfers never form spending patterns
    assert_eq!(patterns.len(), 2);

    let rent = &patterns[0];
    assert_eq!(rent.category, CategoryKey::Category(1));
    assert_eq!(rent.category_name, "Rent");
    assert_eq!(rent.periodicity, Periodicity::Monthly);
    assert!(rent.is_recurring);
    assert_eq!(rent.trend, TrendDirection::Stable);
    assert_eq!(rent.avg_amount, 1000.0);

    let groceries = &patterns[1];
    assert_eq!(groceries.total_amount, 775.0);
    assert_eq!(groceries.trend, TrendDirection::Increasing);
}

#[test]
fn test_trends_and_forecast_from_csv_snapshot() {
    let store = household_store();
    let analytics = Analytics::with_today(&store, &store, today());

    let trends = analytics.analyze_trends(2).unwrap();
    assert_eq!(trends.len(), 2);
    assert_eq!(trends[0].period, "2026-05");
    assert_eq!(trends[0].current_value, 1140.0);
    assert_eq!(trends[1].current_value, 1150.0);
    assert_eq!(trends[1].direction, Direction::Stable);

    let forecast = analytics.predict_spending(2).unwrap();
    assert_eq!(forecast.len(), 2);
    assert_eq!(forecast[0].month, "2026-07");
    // Rising groceries push month two above month one
    assert!(forecast[1].predicted_total > forecast[0].predicted_total);
}

#[test]
fn test_reports_from_csv_snapshot() {
    let store = household_store();
    let analytics = Analytics::with_today(&store, &store, today());

    let may = analytics.generate_monthly_report(2026, 5).unwrap();
    assert_eq!(may.income, 5000.0);
    assert_eq!(may.total_expenses, 1140.0);
    assert_eq!(may.savings, 500.0);
    assert_eq!(may.net_cash_flow, 3860.0);

    let annual = analytics.generate_annual_report(2026).unwrap();
    assert!(annual.year_over_year.is_none());
    assert_eq!(annual.months[5].income, 5000.0);

    let summary = analytics
        .generate_executive_summary(DateRange::new(date(2026, 1, 1), date(2026, 6, 15)))
        .unwrap();
    assert_eq!(summary.cash_flow.len(), 6);
    assert!(summary.overview.savings_rate < 10.0);
    assert!(summary
        .concerns
        .iter()
        .any(|c| c.contains("Groceries") && c.contains("increasing")));
    // Rent dominates expenses
    assert!(summary.recommendations.iter().any(|r| r.contains("Rent")));
    assert!(summary.forecast.is_some());

    // Reports are plain values that serialize for front ends
    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["overview"]["income"].is_number());
}

#[test]
fn test_compare_and_suggest_from_csv_snapshot() {
    let store = household_store();
    let analytics = Analytics::with_today(&store, &store, today());

    let comparison = analytics
        .compare_periods(
            DateRange::new(date(2026, 1, 1), date(2026, 3, 31)),
            DateRange::new(date(2026, 4, 1), date(2026, 6, 30)),
            ("Q1", "Q2"),
        )
        .unwrap();
    assert_eq!(comparison.first.label, "Q1");
    assert_eq!(comparison.categories[0].category_name, "Groceries");
    assert_eq!(comparison.categories[0].change, 55.0);

    let suggestion = analytics.suggest_category("whole foods", 80.0).unwrap();
    assert_eq!(suggestion.map(|c| c.name), Some("Groceries".to_string()));
}
