//! Standard deviation of closing prices around a window's SMA.
//!
//! STDDEV(n) = sqrt(sum((C[j] - SMA(n))^2 for j in window) / d)
//!
//! Bollinger width uses the population divisor d = n, keeping band width tied
//! to the SMA period. The sample divisor d = n - 1 is available explicitly.

use crate::domain::error::AnalyzerError;
use crate::domain::price::{PricePoint, PriceSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceDivisor {
    /// Divide by n.
    Population,
    /// Divide by n - 1.
    Sample,
}

impl VarianceDivisor {
    fn divisor(self, n: usize) -> f64 {
        match self {
            VarianceDivisor::Population => n as f64,
            VarianceDivisor::Sample => n.saturating_sub(1) as f64,
        }
    }
}

/// Divisor used for Bollinger Band volatility.
pub const BOLLINGER_VARIANCE: VarianceDivisor = VarianceDivisor::Population;

/// Deviation of `window` closes around `mean`, folded sequentially by index.
///
/// Returns 0.0 when the divisor would be zero (empty window, or a single
/// point under the sample divisor).
pub fn standard_deviation(window: &[PricePoint], mean: f64, divisor: VarianceDivisor) -> f64 {
    let d = divisor.divisor(window.len());
    if d == 0.0 {
        return 0.0;
    }

    let sum_sq: f64 = window
        .iter()
        .map(|p| {
            let diff = p.close - mean;
            diff * diff
        })
        .sum();

    (sum_sq / d).sqrt()
}

/// Population deviation of the most recent `window` closes around `mean`.
pub fn latest_window_stddev(
    series: &PriceSeries,
    window: usize,
    mean: f64,
) -> Result<f64, AnalyzerError> {
    if window == 0 {
        return Err(AnalyzerError::invalid_parameter("window", window));
    }

    let recent = series
        .tail(window)
        .ok_or(AnalyzerError::InsufficientData {
            points: series.len(),
            required: window,
        })?;

    Ok(standard_deviation(recent, mean, BOLLINGER_VARIANCE))
}
