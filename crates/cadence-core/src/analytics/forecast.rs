//! Forecaster
//!
//! Projects spending for the coming months from a 6-month lookback:
//! - per category: average × frequency, drifted by the category's trend
//! - per transaction type: plain monthly average
//!
//! Confidence values are heuristic weightings of how much history backs a
//! projection. They are not calibrated probabilities.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    CategoryPrediction, SpendingPattern, SpendingPrediction, Transaction, TransactionType,
    TrendDirection, TypePrediction,
};

use super::patterns::{detect_patterns, pattern_window};
use super::stats::{month_label, shift_month};
use super::{validate_months, Analytics};

/// Months of history behind every forecast
const LOOKBACK_MONTHS: u32 = 6;

/// Longest horizon a forecast will project
pub const MAX_FORECAST_MONTHS: u32 = 120;

/// Per-month drift applied to trending categories
const MONTHLY_DRIFT: f64 = 0.05;

const BASE_CONFIDENCE: f64 = 0.5;
const HIGH_FREQUENCY: f64 = 4.0;
const HIGH_FREQUENCY_BONUS: f64 = 0.2;
const MEDIUM_FREQUENCY: f64 = 2.0;
const MEDIUM_FREQUENCY_BONUS: f64 = 0.1;
const RECURRING_BONUS: f64 = 0.2;
const STABLE_BONUS: f64 = 0.1;

/// Observations needed for the higher per-type confidence
const TYPE_MIN_OBSERVATIONS: usize = 5;
const TYPE_CONFIDENCE_HIGH: f64 = 0.7;
const TYPE_CONFIDENCE_LOW: f64 = 0.4;

impl Analytics<'_> {
    /// One prediction per month for the next `months_ahead` months
    ///
    /// Returns an empty list when the lookback holds no transactions.
    /// Horizons beyond [`MAX_FORECAST_MONTHS`] are rejected.
    pub fn predict_spending(&self, months_ahead: u32) -> Result<Vec<SpendingPrediction>> {
        validate_months("months ahead", months_ahead)?;
        if months_ahead > MAX_FORECAST_MONTHS {
            return Err(Error::InvalidRange(format!(
                "{} months ahead is too far (max {})",
                months_ahead, MAX_FORECAST_MONTHS
            )));
        }
        let horizon = months_ahead as i32;

        let window = pattern_window(self.today, LOOKBACK_MONTHS)?;
        debug!(months_ahead, lookback = LOOKBACK_MONTHS, "Forecasting spending");

        let transactions = self.fetch(window)?;
        if transactions.is_empty() {
            debug!("No transactions in lookback, skipping forecast");
            return Ok(Vec::new());
        }

        let names = self.names()?;
        let patterns = detect_patterns(&transactions, window, LOOKBACK_MONTHS, &names);
        let types = type_predictions(&transactions);

        let predictions: Vec<SpendingPrediction> = (1..=horizon)
            .map(|k| {
                let (year, month) = shift_month(self.today.year(), self.today.month(), k);
                let categories: Vec<CategoryPrediction> = patterns
                    .iter()
                    .map(|p| CategoryPrediction {
                        category: p.category,
                        category_name: p.category_name.clone(),
                        predicted_amount: project_amount(p, k as u32),
                        confidence: category_confidence(p),
                        trend: p.trend,
                    })
                    .collect();

                SpendingPrediction {
                    month: month_label(year, month),
                    months_ahead: k as u32,
                    predicted_total: categories.iter().map(|c| c.predicted_amount).sum(),
                    categories,
                    types: types.clone(),
                }
            })
            .collect();

        debug!(
            predictions = predictions.len(),
            categories = patterns.len(),
            "Forecast complete"
        );
        Ok(predictions)
    }
}

/// Projected amount for a category `months_ahead` months out, never negative
pub fn project_amount(pattern: &SpendingPattern, months_ahead: u32) -> f64 {
    let base = pattern.avg_amount * pattern.frequency_per_month;
    let drift = MONTHLY_DRIFT * months_ahead as f64;
    let adjusted = match pattern.trend {
        TrendDirection::Increasing => base * (1.0 + drift),
        TrendDirection::Decreasing => base * (1.0 - drift),
        TrendDirection::Stable => base,
    };
    adjusted.max(0.0)
}

/// Heuristic confidence in [0, 1] for a category projection
pub fn category_confidence(pattern: &SpendingPattern) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if pattern.frequency_per_month >= HIGH_FREQUENCY {
        confidence += HIGH_FREQUENCY_BONUS;
    } else if pattern.frequency_per_month >= MEDIUM_FREQUENCY {
        confidence += MEDIUM_FREQUENCY_BONUS;
    }
    if pattern.is_recurring {
        confidence += RECURRING_BONUS;
    }
    if pattern.trend == TrendDirection::Stable {
        confidence += STABLE_BONUS;
    }

    confidence.min(1.0)
}

/// Monthly average per transaction type over the lookback
fn type_predictions(transactions: &[Transaction]) -> Vec<TypePrediction> {
    let mut totals: BTreeMap<TransactionType, (f64, usize)> = BTreeMap::new();
    for tx in transactions {
        let entry = totals.entry(tx.transaction_type).or_insert((0.0, 0));
        entry.0 += tx.amount.abs();
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(transaction_type, (total, count))| TypePrediction {
            transaction_type,
            predicted_amount: total / LOOKBACK_MONTHS as f64,
            confidence: if count >= TYPE_MIN_OBSERVATIONS {
                TYPE_CONFIDENCE_HIGH
            } else {
                TYPE_CONFIDENCE_LOW
            },
            observed_transactions: count,
        })
        .collect()
}
