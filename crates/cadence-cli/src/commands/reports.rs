//! Report command implementations

use anyhow::Result;
use cadence_core::analytics::stats::{month_end, month_start, shift_month};
use cadence_core::models::CategoryAmount;
use cadence_core::{Analytics, DateRange};
use chrono::{Datelike, Duration, NaiveDate};

use super::{parse_date, print_json, truncate};

/// Resolve a period string (or custom dates) to a date range ending no later than `today`
///
/// `all` starts at `earliest`, the oldest transaction date in the snapshot,
/// or at `today` when the snapshot is empty.
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
    today: NaiveDate,
    earliest: Option<NaiveDate>,
) -> Result<DateRange> {
    // If custom dates provided, use those
    if let (Some(from), Some(to)) = (custom_from, custom_to) {
        let from_date = parse_date(from, "--from")?;
        let to_date = parse_date(to, "--to")?;
        return Ok(DateRange::new(from_date, to_date));
    }

    let this_month = month_start(today.year(), today.month())?;

    match period.to_lowercase().as_str() {
        "this-month" => Ok(DateRange::new(this_month, today)),
        "last-month" => {
            let (year, month) = shift_month(today.year(), today.month(), -1);
            Ok(DateRange::new(month_start(year, month)?, month_end(year, month)?))
        }
        "this-year" => Ok(DateRange::new(month_start(today.year(), 1)?, today)),
        "last-30-days" => Ok(DateRange::new(today - Duration::days(30), today)),
        "last-90-days" => Ok(DateRange::new(today - Duration::days(90), today)),
        "last-12-months" => {
            let (year, month) = shift_month(today.year(), today.month(), -12);
            Ok(DateRange::new(month_start(year, month)?, today))
        }
        "all" => Ok(DateRange::new(earliest.unwrap_or(today).min(today), today)),
        _ => anyhow::bail!("Unknown period: {}. Available: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all", period),
    }
}

fn print_category_table(categories: &[CategoryAmount], limit: usize) {
    println!(
        "   {:25} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────┼────────┼───────");
    for category in categories.iter().take(limit) {
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            truncate(&category.category_name, 25),
            category.amount,
            category.percentage,
            category.transaction_count
        );
    }
}

pub fn cmd_report_monthly(
    analytics: &Analytics,
    year: i32,
    month: u32,
    limit: usize,
    json: bool,
) -> Result<()> {
    let report = analytics.generate_monthly_report(year, month)?;
    if json {
        return print_json(&report);
    }

    println!();
    println!("📅 Monthly Report: {:04}-{:02}", report.year, report.month);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.transaction_count == 0 {
        println!("   No transactions found in this month.");
        return Ok(());
    }

    println!("   Income:            ${:>10.2}", report.income);
    println!("   Fixed expenses:    ${:>10.2}", report.fixed_expenses);
    println!("   Variable expenses: ${:>10.2}", report.variable_expenses);
    println!("   Total expenses:    ${:>10.2}", report.total_expenses);
    println!("   Savings:           ${:>10.2}", report.savings);
    println!("   Net cash flow:     ${:>10.2}", report.net_cash_flow);
    println!(
        "   Transactions: {} (avg ${:.2})",
        report.transaction_count, report.average_transaction_amount
    );

    if !report.top_categories.is_empty() {
        println!();
        println!("   Top expense categories:");
        print_category_table(&report.top_categories, limit);
    }

    if !report.trends.is_empty() {
        println!();
        println!("   Expense trend:");
        for point in &report.trends {
            println!(
                "      {}  ${:>10.2}  {:>+6.1}%  {}",
                point.period,
                point.current_value,
                point.percent_change,
                point.direction.as_str()
            );
        }
    }

    Ok(())
}

pub fn cmd_report_annual(analytics: &Analytics, year: i32, limit: usize, json: bool) -> Result<()> {
    let report = analytics.generate_annual_report(year)?;
    if json {
        return print_json(&report);
    }

    println!();
    println!("🗓️  Annual Report: {}", report.year);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.transaction_count == 0 {
        println!("   No transactions found in this year.");
        return Ok(());
    }

    println!("   Income:         ${:>11.2}", report.income);
    println!("   Total expenses: ${:>11.2}", report.total_expenses);
    println!("   Savings:        ${:>11.2}", report.savings);
    println!("   Net cash flow:  ${:>11.2}", report.net_cash_flow);

    if let Some(ref yoy) = report.year_over_year {
        println!();
        println!("   vs {}:", yoy.previous_year);
        println!("      Income   {:>+7.1}%", yoy.income_change);
        println!("      Expenses {:>+7.1}%", yoy.expense_change);
        println!("      Savings  {:>+7.1}%", yoy.savings_change);
    }

    println!();
    println!(
        "   {:5} │ {:>10} │ {:>10} │ {:>10} │ {:>10}",
        "Month", "Income", "Expenses", "Savings", "Net"
    );
    println!("   ──────┼────────────┼────────────┼────────────┼────────────");
    for month in &report.months {
        println!(
            "   {:>5} │ {:>10.2} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            month.month, month.income, month.expenses, month.savings, month.net_cash_flow
        );
    }

    if !report.categories.is_empty() {
        println!();
        println!("   Categories (share of all activity):");
        print_category_table(&report.categories, limit);
    }

    Ok(())
}

pub fn cmd_report_summary(
    analytics: &Analytics,
    range: DateRange,
    limit: usize,
    json: bool,
) -> Result<()> {
    let summary = analytics.generate_executive_summary(range)?;
    if json {
        return print_json(&summary);
    }

    let overview = &summary.overview;

    println!();
    println!("📊 Executive Summary");
    println!("   Period: {} to {}", summary.range.start, summary.range.end);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:        ${:>10.2}", overview.income);
    println!("   Expenses:      ${:>10.2}", overview.expenses);
    println!("   Savings:       ${:>10.2}", overview.savings);
    println!("   Net cash flow: ${:>10.2}", overview.net_cash_flow);
    println!("   Savings rate:  {:>10.1}%", overview.savings_rate);

    if !summary.highlights.is_empty() {
        println!();
        println!("   ✅ Highlights:");
        for highlight in &summary.highlights {
            println!("      • {}", highlight);
        }
    }

    if !summary.concerns.is_empty() {
        println!();
        println!("   ⚠️  Concerns:");
        for concern in &summary.concerns {
            println!("      • {}", concern);
        }
    }

    if !summary.top_categories.is_empty() {
        println!();
        println!("   Top expense categories:");
        print_category_table(&summary.top_categories, limit);
    }

    if !summary.cash_flow.is_empty() {
        println!();
        println!("   {:8} │ {:>10} │ {:>10} │ {:>10}", "Month", "Income", "Expenses", "Net");
        println!("   ─────────┼────────────┼────────────┼────────────");
        for point in &summary.cash_flow {
            println!(
                "   {:8} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
                point.period, point.income, point.expenses, point.net_cash_flow
            );
        }
    }

    match summary.forecast {
        Some(ref forecast) => {
            println!();
            println!(
                "   🔮 Next month ({}): ${:.2} predicted",
                forecast.month, forecast.predicted_total
            );
        }
        None => {
            println!();
            println!("   🔮 Not enough recent history for a forecast.");
        }
    }

    println!();
    println!("   💡 Recommendations:");
    for recommendation in &summary.recommendations {
        println!("      • {}", recommendation);
    }

    Ok(())
}
