//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cadence - Spending patterns, trends and forecasts from your transactions
#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Read-only spending analytics over a transaction snapshot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transactions file (CSV or JSON snapshot)
    ///
    /// Falls back to `[data] transactions` in the settings file.
    #[arg(short, long, global = true)]
    pub transactions: Option<PathBuf>,

    /// Categories file (CSV `id,name` or JSON list)
    #[arg(short, long, global = true)]
    pub categories: Option<PathBuf>,

    /// Settings file (defaults to ~/.local/share/cadence/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) to use instead of today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show per-category spending patterns
    Patterns {
        /// Trailing months to analyze (defaults to settings)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Show month-over-month expense trends
    Trends {
        /// Months to show, ending with the current one (defaults to settings)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Forecast spending for the coming months
    Forecast {
        /// Months to project (defaults to settings)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Compare two date ranges
    Compare {
        /// Start of the first range (YYYY-MM-DD)
        #[arg(long)]
        first_from: String,

        /// End of the first range (YYYY-MM-DD)
        #[arg(long)]
        first_to: String,

        /// Start of the second range (YYYY-MM-DD)
        #[arg(long)]
        second_from: String,

        /// End of the second range (YYYY-MM-DD)
        #[arg(long)]
        second_to: String,

        /// Label for the first range
        #[arg(long, default_value = "Before")]
        first_label: String,

        /// Label for the second range
        #[arg(long, default_value = "After")]
        second_label: String,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Suggest a category for a transaction description
    Suggest {
        /// Transaction description
        description: String,

        /// Transaction amount (accepted for interface stability, not scored)
        #[arg(short, long, default_value = "0")]
        amount: f64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Report for one calendar month
    Monthly {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Report for one calendar year, with year-over-year changes
    Annual {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Executive summary with highlights, concerns and recommendations
    Summary {
        /// Time period: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all
        #[arg(short, long, default_value = "this-year")]
        period: String,

        /// Custom start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}
