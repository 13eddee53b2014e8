//! Advanced metrics for the most recent window and whole-series summary statistics.

use crate::domain::error::AnalyzerError;
use crate::domain::indicator::bollinger::compute_bands;
use crate::domain::indicator::rsi::{compute_rsi_with, RsiMethod};
use crate::domain::indicator::stddev::latest_window_stddev;
use crate::domain::indicator::{AdvancedMetrics, WindowedResult};
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

/// Bands from the latest SMA and the deviation of its window; RSI over the whole series.
pub fn compute_advanced_metrics(
    series: &PriceSeries,
    sma_results: &[WindowedResult],
    window: usize,
    rsi_period: usize,
    rsi_method: RsiMethod,
) -> Result<AdvancedMetrics, AnalyzerError> {
    let latest_sma = sma_results
        .last()
        .and_then(|r| r.moving_average)
        .ok_or(AnalyzerError::InsufficientData {
            points: series.len(),
            required: window,
        })?;

    let standard_deviation = latest_window_stddev(series, window, latest_sma)?;
    let bands = compute_bands(latest_sma, standard_deviation);
    let rsi = compute_rsi_with(series, rsi_period, rsi_method)?;

    Ok(AdvancedMetrics {
        standard_deviation,
        upper_band: bands.upper,
        lower_band: bands.lower,
        rsi,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub first_close: f64,
    pub latest_close: f64,
    pub price_change: f64,
    /// Percent change from first to latest close; 0 when the first close is not positive.
    pub percent_change: f64,
    pub highest: f64,
    pub lowest: f64,
    /// How far the latest close sits below the highest high, in percent.
    pub below_high_pct: f64,
}

pub fn summarize(series: &PriceSeries) -> Option<SeriesSummary> {
    let first = series.first()?;
    let latest = series.latest()?;

    let highest = series
        .points()
        .iter()
        .map(|p| p.high)
        .fold(first.high, f64::max);
    let lowest = series
        .points()
        .iter()
        .map(|p| p.low)
        .fold(first.low, f64::min);

    let price_change = latest.close - first.close;
    let percent_change = if first.close > 0.0 {
        price_change / first.close * 100.0
    } else {
        0.0
    };
    let below_high_pct = if highest > 0.0 {
        (highest - latest.close) / highest * 100.0
    } else {
        0.0
    };

    Some(SeriesSummary {
        start_date: first.date,
        end_date: latest.date,
        first_close: first.close,
        latest_close: latest.close,
        price_change,
        percent_change,
        highest,
        lowest,
        below_high_pct,
    })
}
