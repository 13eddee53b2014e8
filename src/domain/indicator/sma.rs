//! Simple Moving Average.
//!
//! SMA(n)[i] = (C[i-n+1] + ... + C[i]) / n, an unweighted mean over exactly n closes.
//! Each window is summed independently in index order, so repeated runs are
//! bit-for-bit identical.
//!
//! Warmup: the first (n-1) points have no average. Under `WarmupPolicy::Strict`
//! they are omitted; under `WarmupPolicy::Padded` they are emitted with `None`.

use crate::domain::error::AnalyzerError;
use crate::domain::indicator::{WarmupPolicy, WindowedResult};
use crate::domain::price::{PricePoint, PriceSeries};

pub fn compute_sma(
    series: &PriceSeries,
    window: usize,
    policy: WarmupPolicy,
) -> Result<Vec<WindowedResult>, AnalyzerError> {
    if window == 0 {
        return Err(AnalyzerError::invalid_parameter("window", window));
    }

    let points = series.points();
    if policy == WarmupPolicy::Strict && points.len() < window {
        return Err(AnalyzerError::InsufficientData {
            points: points.len(),
            required: window,
        });
    }

    let warmup = window - 1;
    let mut results = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        if i < warmup {
            if policy == WarmupPolicy::Padded {
                results.push(WindowedResult {
                    date: point.date,
                    close: point.close,
                    moving_average: None,
                });
            }
            continue;
        }

        let start = i + 1 - window;
        results.push(WindowedResult {
            date: point.date,
            close: point.close,
            moving_average: Some(window_mean(&points[start..=i])),
        });
    }

    Ok(results)
}

/// Arithmetic mean of the closes in `window`, summed in index order.
pub fn window_mean(window: &[PricePoint]) -> f64 {
    window.iter().map(|p| p.close).sum::<f64>() / window.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn make_series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn sma_full_windows_only() {
        let series = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let results = compute_sma(&series, 3, WarmupPolicy::Strict).unwrap();

        assert_eq!(results.len(), 3);
        let averages: Vec<f64> = results.iter().map(|r| r.moving_average.unwrap()).collect();
        assert_eq!(averages, vec![11.0, 12.0, 13.0]);
        assert_eq!(results[0].date, series.points()[2].date);
        assert_eq!(results[0].close, 12.0);
    }

    #[test]
    fn sma_padded_marks_warmup_absent() {
        let series = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let results = compute_sma(&series, 3, WarmupPolicy::Padded).unwrap();

        assert_eq!(results.len(), 5);
        assert_eq!(results[0].moving_average, None);
        assert_eq!(results[1].moving_average, None);
        assert_eq!(results[2].moving_average, Some(11.0));
        assert_eq!(results[4].moving_average, Some(13.0));
    }

    #[test]
    fn sma_zero_window_is_invalid() {
        let series = make_series(&[1.0, 2.0]);
        for policy in [WarmupPolicy::Strict, WarmupPolicy::Padded] {
            let err = compute_sma(&series, 0, policy).unwrap_err();
            assert!(matches!(err, AnalyzerError::InvalidParameter { value: 0, .. }));
        }
    }

    #[test]
    fn sma_short_series_strict_fails() {
        let series = make_series(&[1.0, 2.0]);
        let err = compute_sma(&series, 3, WarmupPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::InsufficientData {
                points: 2,
                required: 3
            }
        ));
    }

    #[test]
    fn sma_short_series_padded_all_absent() {
        let series = make_series(&[1.0, 2.0]);
        let results = compute_sma(&series, 3, WarmupPolicy::Padded).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.is_computable()));
    }

    #[test]
    fn sma_length_equals_window_yields_one() {
        let series = make_series(&[2.0, 4.0, 6.0, 8.0]);
        let results = compute_sma(&series, 4, WarmupPolicy::Strict).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].moving_average, Some(5.0));
    }

    #[test]
    fn sma_window_one_is_identity() {
        let series = make_series(&[3.5, 7.25, 1.0]);
        let results = compute_sma(&series, 1, WarmupPolicy::Strict).unwrap();
        let averages: Vec<f64> = results.iter().map(|r| r.moving_average.unwrap()).collect();
        assert_eq!(averages, vec![3.5, 7.25, 1.0]);
    }

    #[test]
    fn sma_empty_series() {
        let series = PriceSeries::default();
        assert!(compute_sma(&series, 1, WarmupPolicy::Strict).is_err());
        assert!(compute_sma(&series, 1, WarmupPolicy::Padded)
            .unwrap()
            .is_empty());
    }

    proptest! {
        #[test]
        fn sma_matches_direct_mean(
            prices in prop::collection::vec(1.0f64..1000.0, 1..60),
            window in 1usize..30,
        ) {
            prop_assume!(prices.len() >= window);
            let series = make_series(&prices);
            let results = compute_sma(&series, window, WarmupPolicy::Strict).unwrap();

            prop_assert_eq!(results.len(), prices.len() - window + 1);
            for (k, r) in results.iter().enumerate() {
                let expected: f64 = prices[k..k + window].iter().sum::<f64>() / window as f64;
                assert_relative_eq!(r.moving_average.unwrap(), expected, max_relative = 1e-9);
            }
        }

        #[test]
        fn sma_is_idempotent(
            prices in prop::collection::vec(1.0f64..1000.0, 0..40),
            window in 1usize..10,
        ) {
            let series = make_series(&prices);
            let first = compute_sma(&series, window, WarmupPolicy::Padded).unwrap();
            let second = compute_sma(&series, window, WarmupPolicy::Padded).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn sma_padded_prefix_length(
            prices in prop::collection::vec(1.0f64..1000.0, 0..40),
            window in 1usize..10,
        ) {
            let series = make_series(&prices);
            let results = compute_sma(&series, window, WarmupPolicy::Padded).unwrap();
            prop_assert_eq!(results.len(), prices.len());
            let absent = results.iter().filter(|r| !r.is_computable()).count();
            prop_assert_eq!(absent, (window - 1).min(prices.len()));
        }
    }
}
