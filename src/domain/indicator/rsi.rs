//! RSI (Relative Strength Index), evaluated at the last point of a series.
//!
//! `RsiMethod::Simple` (default) averages the last n day-over-day changes once:
//! - avg_gain = sum(positive changes) / n
//! - avg_loss = sum(|negative changes|) / n
//!
//! `RsiMethod::Wilder` is an opt-in variant: the first n changes seed the
//! averages, then each later change is folded in with
//! avg = (prev_avg * (n-1) + current) / n.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//! Fewer than n + 1 points: RSI = 50 (neutral).

use crate::domain::error::AnalyzerError;
use crate::domain::price::PriceSeries;
use std::fmt;
use std::str::FromStr;

pub const RSI_DEFAULT_PERIOD: usize = 14;
pub const RSI_NEUTRAL: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsiMethod {
    #[default]
    Simple,
    Wilder,
}

impl FromStr for RsiMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(RsiMethod::Simple),
            "wilder" => Ok(RsiMethod::Wilder),
            other => Err(format!("unknown RSI method '{}'", other)),
        }
    }
}

impl fmt::Display for RsiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiMethod::Simple => write!(f, "simple"),
            RsiMethod::Wilder => write!(f, "wilder"),
        }
    }
}

pub fn compute_rsi(series: &PriceSeries, period: usize) -> Result<f64, AnalyzerError> {
    compute_rsi_with(series, period, RsiMethod::Simple)
}

pub fn compute_rsi_with(
    series: &PriceSeries,
    period: usize,
    method: RsiMethod,
) -> Result<f64, AnalyzerError> {
    if period == 0 {
        return Err(AnalyzerError::invalid_parameter("period", period));
    }

    let closes = series.closes();
    if closes.len() < period + 1 {
        return Ok(RSI_NEUTRAL);
    }

    let (avg_gain, avg_loss) = match method {
        RsiMethod::Simple => simple_averages(&closes, period),
        RsiMethod::Wilder => wilder_averages(&closes, period),
    };

    Ok(rsi_from_averages(avg_gain, avg_loss))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

/// Gain/loss of one day-over-day change.
fn split_change(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, change.abs())
    }
}

fn simple_averages(closes: &[f64], period: usize) -> (f64, f64) {
    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in closes.len() - period..closes.len() {
        let (gain, loss) = split_change(closes[i] - closes[i - 1]);
        gains += gain;
        losses += loss;
    }

    (gains / period as f64, losses / period as f64)
}

fn wilder_averages(closes: &[f64], period: usize) -> (f64, f64) {
    let changes: Vec<(f64, f64)> = closes
        .windows(2)
        .map(|pair| split_change(pair[1] - pair[0]))
        .collect();

    let (seed, rest) = changes.split_at(period);
    let mut avg_gain = seed.iter().map(|c| c.0).sum::<f64>() / period as f64;
    let mut avg_loss = seed.iter().map(|c| c.1).sum::<f64>() / period as f64;

    for &(gain, loss) in rest {
        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
    }

    (avg_gain, avg_loss)
}
