//! Analysis command implementations

use anyhow::Result;
use cadence_core::models::Direction;
use cadence_core::{Analytics, DateRange};

use super::{print_json, truncate};

pub fn cmd_patterns(analytics: &Analytics, months: u32, limit: usize, json: bool) -> Result<()> {
    let patterns = analytics.analyze_patterns(months)?;
    if json {
        return print_json(&patterns);
    }

    println!();
    println!("🔁 Spending Patterns (last {} months)", months);
    println!("   ─────────────────────────────────────────────────────────────");

    if patterns.is_empty() {
        println!("   Not enough spending history to find patterns.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>10} │ {:>8} │ {:>6} │ {:10} │ {:10}",
        "Category", "Total", "Avg", "/mo", "Cadence", "Trend"
    );
    println!("   ─────────────────────┼────────────┼──────────┼────────┼────────────┼───────────");

    for pattern in patterns.iter().take(limit) {
        let cadence = if pattern.is_recurring {
            format!("{} ↻", pattern.periodicity.as_str())
        } else {
            pattern.periodicity.as_str().to_string()
        };
        println!(
            "   {:20} │ {:>10.2} │ {:>8.2} │ {:>6.2} │ {:10} │ {:10}",
            truncate(&pattern.category_name, 20),
            pattern.total_amount,
            pattern.avg_amount,
            pattern.frequency_per_month,
            cadence,
            pattern.trend.as_str()
        );
    }

    if patterns.len() > limit {
        println!("   ... and {} more", patterns.len() - limit);
    }

    Ok(())
}

pub fn cmd_trends(analytics: &Analytics, months: u32, json: bool) -> Result<()> {
    let points = analytics.analyze_trends(months)?;
    if json {
        return print_json(&points);
    }

    println!();
    println!("📈 Expense Trends");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:8} │ {:>10} │ {:>10} │ {:>8} │ {:6}",
        "Month", "Expenses", "Previous", "Change", "Dir"
    );
    println!("   ─────────┼────────────┼────────────┼──────────┼───────");

    for point in &points {
        let arrow = match point.direction {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Stable => "─",
        };
        println!(
            "   {:8} │ {:>10.2} │ {:>10.2} │ {:>7.1}% │ {} {}",
            point.period,
            point.current_value,
            point.previous_value,
            point.percent_change,
            arrow,
            point.direction
        );
    }

    Ok(())
}

pub fn cmd_forecast(analytics: &Analytics, months: u32, limit: usize, json: bool) -> Result<()> {
    let predictions = analytics.predict_spending(months)?;
    if json {
        return print_json(&predictions);
    }

    println!();
    println!("🔮 Spending Forecast");
    println!("   ─────────────────────────────────────────────────────────────");

    if predictions.is_empty() {
        println!("   No recent transactions to forecast from.");
        return Ok(());
    }

    for prediction in &predictions {
        println!();
        println!(
            "   {}  Predicted: ${:.2}",
            prediction.month, prediction.predicted_total
        );
        println!("   {:20} │ {:>10} │ {:>5} │ {:10}", "Category", "Amount", "Conf", "Trend");
        println!("   ─────────────────────┼────────────┼───────┼───────────");
        for category in prediction.categories.iter().take(limit) {
            println!(
                "   {:20} │ {:>10.2} │ {:>4.0}% │ {:10}",
                truncate(&category.category_name, 20),
                category.predicted_amount,
                category.confidence * 100.0,
                category.trend.as_str()
            );
        }
    }

    // Per-type averages are the same for every month
    if let Some(first) = predictions.first() {
        println!();
        println!("   Monthly averages by type:");
        for prediction in &first.types {
            println!(
                "      {:18} ${:>10.2}  ({} transactions)",
                prediction.transaction_type.as_str(),
                prediction.predicted_amount,
                prediction.observed_transactions
            );
        }
    }

    Ok(())
}

pub fn cmd_compare(
    analytics: &Analytics,
    first: DateRange,
    second: DateRange,
    labels: (&str, &str),
    limit: usize,
    json: bool,
) -> Result<()> {
    let comparison = analytics.compare_periods(first, second, labels)?;
    if json {
        return print_json(&comparison);
    }

    println!();
    println!("⚖️  Period Comparison");
    println!(
        "   {}: {} to {}",
        comparison.first.label, comparison.first.range.start, comparison.first.range.end
    );
    println!(
        "   {}: {} to {}",
        comparison.second.label, comparison.second.range.start, comparison.second.range.end
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:12} │ {:>10} │ {:>10} │ {:>10} │ {:>8}",
        "",
        truncate(&comparison.first.label, 10),
        truncate(&comparison.second.label, 10),
        "Change",
        "%"
    );
    println!("   ─────────────┼────────────┼────────────┼────────────┼─────────");

    let rows = [
        ("Income", comparison.first.income, comparison.second.income, &comparison.income_change),
        ("Expenses", comparison.first.expenses, comparison.second.expenses, &comparison.expense_change),
        ("Savings", comparison.first.savings, comparison.second.savings, &comparison.savings_change),
    ];
    for (name, first_value, second_value, change) in rows {
        println!(
            "   {:12} │ {:>10.2} │ {:>10.2} │ {:>+10.2} │ {:>+7.1}%",
            name, first_value, second_value, change.absolute, change.percent
        );
    }

    if !comparison.categories.is_empty() {
        println!();
        println!("   Biggest category changes:");
        for delta in comparison.categories.iter().take(limit) {
            println!(
                "      {:20} {:>10.2} → {:>10.2}  ({:+.2})",
                truncate(&delta.category_name, 20),
                delta.first_amount,
                delta.second_amount,
                delta.change
            );
        }
    }

    Ok(())
}

pub fn cmd_suggest(analytics: &Analytics, description: &str, amount: f64, json: bool) -> Result<()> {
    let suggestion = analytics.suggest_category(description, amount)?;
    if json {
        return print_json(&suggestion);
    }

    match suggestion {
        Some(category) => println!("💡 Suggested category: {} (id {})", category.name, category.id),
        None => println!("No matching category for \"{}\".", description),
    }

    Ok(())
}
