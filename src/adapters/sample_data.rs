//! Synthetic random-walk price data, written as OHLCV CSV.
//!
//! Each day opens at the previous close and moves by U(-2, 2). High and low
//! extend up to 2 beyond the open/close range; volume is U[1000, 11000).

use crate::adapters::csv_adapter::DATE_FORMAT;
use crate::domain::error::AnalyzerError;
use crate::domain::price::{PricePoint, PriceSeries};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::path::Path;
use tracing::info;

pub const DEFAULT_DAYS: usize = 90;
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// `date` moved by `days` (negative goes back), or `None` past chrono's range.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|d| date.checked_add_signed(d))
}

pub fn generate_series<R: Rng>(
    rng: &mut R,
    start: NaiveDate,
    days: usize,
    base_price: f64,
) -> Result<PriceSeries, AnalyzerError> {
    if let Some(last) = days.checked_sub(1) {
        i64::try_from(last)
            .ok()
            .and_then(|last| shift_days(start, last))
            .ok_or(AnalyzerError::DateOutOfRange { start, days })?;
    }

    let mut price = base_price;
    // The last date is in range, so every earlier offset is too.
    let points = (0..days)
        .map(|i| {
            let open = price;
            let close = open + rng.gen_range(-2.0..2.0);
            let high = open.max(close) + rng.gen_range(0.0..2.0);
            let low = open.min(close) - rng.gen_range(0.0..2.0);
            price = close;

            PricePoint {
                date: start + Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: rng.gen_range(1000..11000),
            }
        })
        .collect();

    Ok(PriceSeries::new(points))
}

pub fn write_csv(path: &Path, series: &PriceSeries) -> Result<(), AnalyzerError> {
    let to_err = |e: csv::Error| AnalyzerError::Io(std::io::Error::other(e));

    let mut wtr = csv::Writer::from_path(path).map_err(to_err)?;
    wtr.write_record(["Date", "Open", "High", "Low", "Close", "Volume"])
        .map_err(to_err)?;

    for p in series.points() {
        wtr.write_record([
            p.date.format(DATE_FORMAT).to_string(),
            format!("{:.2}", p.open),
            format!("{:.2}", p.high),
            format!("{:.2}", p.low),
            format!("{:.2}", p.close),
            p.volume.to_string(),
        ])
        .map_err(to_err)?;
    }

    wtr.flush()?;
    info!(path = %path.display(), points = series.len(), "wrote sample data");
    Ok(())
}
