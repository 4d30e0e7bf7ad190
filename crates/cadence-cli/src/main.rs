//! Cadence CLI - Spending analytics over a transaction snapshot
//!
//! Usage:
//!   cadence -t tx.csv patterns --months 6     Per-category spending patterns
//!   cadence -t tx.csv trends                  Month-over-month expense trends
//!   cadence -t tx.csv forecast --months 3     Spending forecast
//!   cadence -t tx.csv report summary          Executive summary

mod cli;
mod commands;


use anyhow::Result;
use cadence_core::{Analytics, DateRange};
use chrono::Datelike;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;
    let store = commands::open_store(
        &settings,
        cli.transactions.as_deref(),
        cli.categories.as_deref(),
    )?;
    let today = commands::reference_date(cli.today.as_deref())?;
    let analytics = Analytics::with_today(&store, &store, today);
    let limit = settings.top_categories;

    match cli.command {
        Commands::Patterns { months } => commands::cmd_patterns(
            &analytics,
            months.unwrap_or(settings.pattern_months),
            limit,
            cli.json,
        ),
        Commands::Trends { months } => {
            commands::cmd_trends(&analytics, months.unwrap_or(settings.trend_months), cli.json)
        }
        Commands::Forecast { months } => commands::cmd_forecast(
            &analytics,
            months.unwrap_or(settings.forecast_months),
            limit,
            cli.json,
        ),
        Commands::Compare {
            first_from,
            first_to,
            second_from,
            second_to,
            first_label,
            second_label,
        } => {
            let first = DateRange::new(
                commands::parse_date(&first_from, "--first-from")?,
                commands::parse_date(&first_to, "--first-to")?,
            );
            let second = DateRange::new(
                commands::parse_date(&second_from, "--second-from")?,
                commands::parse_date(&second_to, "--second-to")?,
            );
            commands::cmd_compare(
                &analytics,
                first,
                second,
                (first_label.as_str(), second_label.as_str()),
                limit,
                cli.json,
            )
        }
        Commands::Report { report_type } => match report_type {
            ReportType::Monthly { year, month } => commands::cmd_report_monthly(
                &analytics,
                year.unwrap_or(today.year()),
                month.unwrap_or(today.month()),
                limit,
                cli.json,
            ),
            ReportType::Annual { year } => commands::cmd_report_annual(
                &analytics,
                year.unwrap_or(today.year()),
                limit,
                cli.json,
            ),
            ReportType::Summary { period, from, to } => {
                let earliest = store.transactions().iter().map(|t| t.date).min();
                let range = commands::resolve_period(
                    &period,
                    from.as_deref(),
                    to.as_deref(),
                    today,
                    earliest,
                )?;
                commands::cmd_report_summary(&analytics, range, limit, cli.json)
            }
        },
        Commands::Suggest {
            description,
            amount,
        } => commands::cmd_suggest(&analytics, &description, amount, cli.json),
    }
}
