//! Report Builder
//!
//! Monthly, annual and executive reports composed from the other analytics
//! components. The executive summary's narrative (highlights, concerns,
//! recommendations) comes from fixed rules so the same data always produces
//! the same text.

use chrono::Datelike;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{
    AnnualReport, CashFlowPoint, CategoryAmount, DateRange, ExecutiveSummary, MonthBreakdown,
    MonthlyReport, Overview, SpendingPattern, SpendingPrediction, Transaction, TrendDirection,
    YearOverYear,
};

use super::patterns::detect_patterns;
use super::stats::{
    category_totals, month_end, month_label, month_start, months_between, percent_change,
    percentage, rank_categories, Totals,
};
use super::{validate_range, Analytics};

/// Categories listed in "top categories" sections
const TOP_CATEGORY_LIMIT: usize = 5;

/// Months of trend included in a monthly report
const MONTHLY_REPORT_TREND_MONTHS: u32 = 3;

/// Savings rate (percent) at or above which savings is a highlight
const STRONG_SAVINGS_RATE: f64 = 20.0;

/// Savings rate (percent) below which savings is a concern
const LOW_SAVINGS_RATE: f64 = 10.0;

/// Share of expenses (percent) above which one category is flagged
const CONCENTRATION_THRESHOLD: f64 = 30.0;

impl Analytics<'_> {
    /// Report for one calendar month
    pub fn generate_monthly_report(&self, year: i32, month: u32) -> Result<MonthlyReport> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidRange(format!("month {} is not in 1..=12", month)));
        }
        let range = DateRange::new(month_start(year, month)?, month_end(year, month)?);
        debug!(year, month, "Generating monthly report");

        let transactions = self.fetch(range)?;
        let names = self.names()?;
        let totals = Totals::from_transactions(&transactions);

        let expenses_by_category =
            category_totals(&transactions, |t| t.transaction_type.is_expense());
        let top_categories = rank_categories(
            &expenses_by_category,
            totals.expenses(),
            &names,
            Some(TOP_CATEGORY_LIMIT),
        );

        let trends = self.trends_ending(year, month, MONTHLY_REPORT_TREND_MONTHS)?;

        debug!(
            year,
            month,
            transactions = totals.count,
            "Monthly report complete"
        );
        Ok(MonthlyReport {
            year,
            month,
            income: totals.income,
            fixed_expenses: totals.fixed_expenses,
            variable_expenses: totals.variable_expenses,
            total_expenses: totals.expenses(),
            savings: totals.savings,
            net_cash_flow: totals.net_cash_flow(),
            top_categories,
            trends,
            transaction_count: totals.count,
            average_transaction_amount: totals.average_amount(),
        })
    }

    /// Report for one calendar year, with year-over-year deltas when the
    /// previous year has any transactions
    pub fn generate_annual_report(&self, year: i32) -> Result<AnnualReport> {
        let range = DateRange::new(month_start(year, 1)?, month_end(year, 12)?);
        debug!(year, "Generating annual report");

        let transactions = self.fetch(range)?;
        let names = self.names()?;
        let totals = Totals::from_transactions(&transactions);

        let months: Vec<MonthBreakdown> = (1..=12)
            .map(|month| {
                let month_totals = Totals::from_transactions(
                    transactions.iter().filter(|t| t.date.month() == month),
                );
                MonthBreakdown {
                    month,
                    income: month_totals.income,
                    expenses: month_totals.expenses(),
                    savings: month_totals.savings,
                    net_cash_flow: month_totals.net_cash_flow(),
                }
            })
            .collect();

        // Shares of everything transacted, not just expenses
        let categories = rank_categories(
            &category_totals(&transactions, |_| true),
            totals.transacted,
            &names,
            None,
        );

        let previous_range = DateRange::new(month_start(year - 1, 1)?, month_end(year - 1, 12)?);
        let previous = self.fetch(previous_range)?;
        let year_over_year = if previous.is_empty() {
            None
        } else {
            let prev = Totals::from_transactions(&previous);
            Some(YearOverYear {
                previous_year: year - 1,
                previous_income: prev.income,
                previous_expenses: prev.expenses(),
                previous_savings: prev.savings,
                income_change: percent_change(totals.income, prev.income),
                expense_change: percent_change(totals.expenses(), prev.expenses()),
                savings_change: percent_change(totals.savings, prev.savings),
            })
        };

        debug!(
            year,
            transactions = totals.count,
            has_previous_year = year_over_year.is_some(),
            "Annual report complete"
        );
        Ok(AnnualReport {
            year,
            income: totals.income,
            fixed_expenses: totals.fixed_expenses,
            variable_expenses: totals.variable_expenses,
            total_expenses: totals.expenses(),
            savings: totals.savings,
            net_cash_flow: totals.net_cash_flow(),
            months,
            categories,
            year_over_year,
            transaction_count: totals.count,
            average_transaction_amount: totals.average_amount(),
        })
    }

    /// Narrative summary of `range`
    ///
    /// The forecast is best effort: if it fails, the summary is still
    /// produced with `forecast: None`.
    pub fn generate_executive_summary(&self, range: DateRange) -> Result<ExecutiveSummary> {
        validate_range(&range)?;
        debug!(start = %range.start, end = %range.end, "Generating executive summary");

        let transactions = self.fetch(range)?;
        let names = self.names()?;
        let totals = Totals::from_transactions(&transactions);

        let overview = Overview {
            income: totals.income,
            expenses: totals.expenses(),
            savings: totals.savings,
            net_cash_flow: totals.net_cash_flow(),
            savings_rate: percentage(totals.savings, totals.income),
            transaction_count: totals.count,
        };

        let calendar_months = months_between(range.start, range.end);
        let cash_flow = cash_flow_points(&transactions, &calendar_months);

        let patterns = detect_patterns(
            &transactions,
            range,
            calendar_months.len().max(1) as u32,
            &names,
        );

        let top_categories = rank_categories(
            &category_totals(&transactions, |t| t.transaction_type.is_expense()),
            overview.expenses,
            &names,
            Some(TOP_CATEGORY_LIMIT),
        );

        let forecast = self.next_month_forecast();
        let narrative = Narrative::build(&overview, &cash_flow, &top_categories, &patterns);

        debug!(
            highlights = narrative.highlights.len(),
            concerns = narrative.concerns.len(),
            recommendations = narrative.recommendations.len(),
            has_forecast = forecast.is_some(),
            "Executive summary complete"
        );
        Ok(ExecutiveSummary {
            range,
            overview,
            highlights: narrative.highlights,
            concerns: narrative.concerns,
            top_categories,
            cash_flow,
            forecast,
            recommendations: narrative.recommendations,
        })
    }

    fn next_month_forecast(&self) -> Option<SpendingPrediction> {
        match self.predict_spending(1) {
            Ok(predictions) => predictions.into_iter().next(),
            Err(e) => {
                warn!("Forecast unavailable for executive summary: {}", e);
                None
            }
        }
    }
}

fn cash_flow_points(transactions: &[Transaction], months: &[(i32, u32)]) -> Vec<CashFlowPoint> {
    months
        .iter()
        .map(|&(year, month)| {
            let totals = Totals::from_transactions(
                transactions
                    .iter()
                    .filter(|t| t.date.year() == year && t.date.month() == month),
            );
            CashFlowPoint {
                period: month_label(year, month),
                income: totals.income,
                expenses: totals.expenses(),
                net_cash_flow: totals.net_cash_flow(),
            }
        })
        .collect()
}

/// Rule-based highlights, concerns and recommendations
#[derive(Debug, Default, PartialEq)]
struct Narrative {
    highlights: Vec<String>,
    concerns: Vec<String>,
    recommendations: Vec<String>,
}

impl Narrative {
    fn build(
        overview: &Overview,
        cash_flow: &[CashFlowPoint],
        top_categories: &[CategoryAmount],
        patterns: &[SpendingPattern],
    ) -> Self {
        let mut narrative = Self::default();
        let rate = overview.savings_rate;

        if rate >= STRONG_SAVINGS_RATE {
            narrative
                .highlights
                .push(format!("Strong savings rate of {:.1}%", rate));
        } else if overview.income > 0.0 && rate < LOW_SAVINGS_RATE {
            narrative
                .concerns
                .push(format!("Low savings rate of {:.1}%", rate));
        }

        if overview.net_cash_flow > 0.0 {
            narrative.highlights.push(format!(
                "Positive net cash flow of ${:.2}",
                overview.net_cash_flow
            ));
        } else if overview.net_cash_flow < 0.0 {
            narrative.concerns.push(format!(
                "Expenses exceeded income by ${:.2}",
                -overview.net_cash_flow
            ));
        }

        let active_months = cash_flow
            .iter()
            .filter(|p| p.income > 0.0 || p.expenses > 0.0)
            .count();
        let negative_months = cash_flow.iter().filter(|p| p.net_cash_flow < 0.0).count();
        if negative_months > 0 {
            narrative.concerns.push(format!(
                "{} month(s) with negative cash flow",
                negative_months
            ));
        } else if active_months > 0 {
            narrative
                .highlights
                .push("Cash flow stayed positive every month".to_string());
        }

        let increasing: Vec<&SpendingPattern> = patterns
            .iter()
            .filter(|p| p.trend == TrendDirection::Increasing)
            .collect();
        for pattern in &increasing {
            narrative
                .concerns
                .push(format!("Spending on {} is increasing", pattern.category_name));
        }

        if rate < LOW_SAVINGS_RATE {
            narrative
                .recommendations
                .push("Build savings toward at least 10% of income".to_string());
        } else if rate < STRONG_SAVINGS_RATE {
            narrative.recommendations.push(format!(
                "Raise savings from {:.1}% toward 20% of income",
                rate
            ));
        }

        if let Some(top) = top_categories.first() {
            if top.percentage > CONCENTRATION_THRESHOLD {
                narrative.recommendations.push(format!(
                    "{} accounts for {:.1}% of expenses; review it for savings",
                    top.category_name, top.percentage
                ));
            }
        }

        for pattern in &increasing {
            narrative
                .recommendations
                .push(format!("Review rising spending in {}", pattern.category_name));
        }

        if narrative.recommendations.is_empty() {
            narrative
                .recommendations
                .push("Finances look balanced; keep monitoring monthly".to_string());
        }

        narrative
    }
}
