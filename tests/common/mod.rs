#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use stockta::domain::error::AnalyzerError;
pub use stockta::domain::price::{PricePoint, PriceSeries};
use stockta::ports::data_port::DataPort;

/// In-memory data port that records which paths were requested.
pub struct MockDataPort {
    pub series: Option<PriceSeries>,
    pub error: Option<String>,
    pub requested: RefCell<Vec<PathBuf>>,
}

impl MockDataPort {
    pub fn new(series: PriceSeries) -> Self {
        Self {
            series: Some(series),
            error: None,
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            series: None,
            error: Some(reason.to_string()),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_series(&self, path: &Path) -> Result<PriceSeries, AnalyzerError> {
        self.requested.borrow_mut().push(path.to_path_buf());
        if let Some(reason) = &self.error {
            return Err(AnalyzerError::DataLoad {
                path: path.display().to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.series.clone().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily points starting 2024-01-01 with the given closes.
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = date(2024, 1, 1);
    closes
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

pub fn ohlcv_csv(closes: &[f64]) -> String {
    let start = date(2024, 1, 1);
    let mut csv = String::from("date,open,high,low,close,volume\n");
    for (i, close) in closes.iter().enumerate() {
        let d = start + chrono::Duration::days(i as i64);
        csv.push_str(&format!(
            "{},{:.2},{:.2},{:.2},{:.2},1000\n",
            d,
            close,
            close + 1.0,
            close - 1.0,
            close
        ));
    }
    csv
}
