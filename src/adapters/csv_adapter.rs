//! CSV file data adapter.
//!
//! Columns are located by header name, case-insensitively. `date` and `close`
//! are required. When `open`, `high` and `low` are all present the rows are
//! read as full bars (`volume` optional, 0 when absent); otherwise open/high/low
//! mirror the close. Unknown columns such as `Adj Close` are ignored.
//!
//! Rows that fail to parse are skipped with a warning. The result is sorted
//! ascending by date so reverse-chronological files load correctly.

use crate::domain::error::AnalyzerError;
use crate::domain::price::{PricePoint, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    Ohlcv,
    CloseOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BarColumns {
    open: usize,
    high: usize,
    low: usize,
    volume: Option<usize>,
}

/// Header positions of the columns the adapter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: usize,
    close: usize,
    bar: Option<BarColumns>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, String> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let date = find("date").ok_or("header has no 'date' column")?;
        let close = find("close").ok_or("header has no 'close' column")?;

        let bar = match (find("open"), find("high"), find("low")) {
            (Some(open), Some(high), Some(low)) => Some(BarColumns {
                open,
                high,
                low,
                volume: find("volume"),
            }),
            (None, None, None) => None,
            _ => {
                warn!("incomplete open/high/low columns, reading close only");
                None
            }
        };

        Ok(Self { date, close, bar })
    }

    fn layout(&self) -> CsvLayout {
        match self.bar {
            Some(_) => CsvLayout::Ohlcv,
            None => CsvLayout::CloseOnly,
        }
    }
}

#[derive(Debug, Default)]
pub struct CsvAdapter;

impl CsvAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Parses CSV `content`; `source` names the input in errors and logs.
    pub fn parse_str(&self, content: &str, source: &str) -> Result<PriceSeries, AnalyzerError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| load_error(source, e))?;
        let columns = ColumnMap::from_headers(headers).map_err(|reason| AnalyzerError::DataLoad {
            path: source.to_string(),
            reason,
        })?;
        debug!(source, layout = ?columns.layout(), "detected CSV layout");

        let mut points = Vec::new();
        let mut skipped = 0usize;

        for (idx, result) in rdr.records().enumerate() {
            // Header is line 1.
            let line = idx + 2;
            let record = result.map_err(|e| load_error(source, e))?;

            match parse_record(&record, &columns) {
                Ok(point) => points.push(point),
                Err(reason) => {
                    warn!(source, line, %reason, "skipping malformed row");
                    skipped += 1;
                }
            }
        }

        if points.is_empty() {
            return Err(AnalyzerError::DataLoad {
                path: source.to_string(),
                reason: "no valid price data found".into(),
            });
        }

        points.sort_by_key(|p| p.date);
        info!(source, points = points.len(), skipped, "loaded price series");
        Ok(PriceSeries::new(points))
    }
}

impl DataPort for CsvAdapter {
    fn load_series(&self, path: &Path) -> Result<PriceSeries, AnalyzerError> {
        let content = fs::read_to_string(path).map_err(|e| AnalyzerError::DataLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.parse_str(&content, &path.display().to_string())
    }
}

fn load_error(source: &str, e: csv::Error) -> AnalyzerError {
    AnalyzerError::DataLoad {
        path: source.to_string(),
        reason: format!("CSV parse error: {}", e),
    }
}

fn parse_record(record: &csv::StringRecord, columns: &ColumnMap) -> Result<PricePoint, String> {
    let date_str = field(record, columns.date, "date")?;
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|e| format!("invalid date '{}': {}", date_str, e))?;
    let close = number(record, columns.close, "close")?;

    let Some(bar) = columns.bar else {
        return Ok(PricePoint::from_close(date, close));
    };

    let volume = match bar.volume {
        Some(idx) => field(record, idx, "volume")?
            .parse()
            .map_err(|e| format!("invalid volume value: {}", e))?,
        None => 0,
    };

    Ok(PricePoint {
        date,
        open: number(record, bar.open, "open")?,
        high: number(record, bar.high, "high")?,
        low: number(record, bar.low, "low")?,
        close,
        volume,
    })
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing {} column", name))
}

fn number(record: &csv::StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let value: f64 = field(record, idx, name)?
        .parse()
        .map_err(|e| format!("invalid {} value: {}", name, e))?;
    if !value.is_finite() {
        return Err(format!("invalid {} value: {}", name, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const OHLCV: &str = "date,open,high,low,close,volume\n\
        2024-01-15,100.0,110.0,90.0,105.0,50000\n\
        2024-01-16,105.0,115.0,100.0,110.0,60000\n\
        2024-01-17,110.0,120.0,105.0,115.0,55000\n";

    #[test]
    fn parses_ohlcv_rows() {
        let series = CsvAdapter::new().parse_str(OHLCV, "test").unwrap();

        assert_eq!(series.len(), 3);
        let first = &series.points()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(first.open, 100.0);
        assert_eq!(first.high, 110.0);
        assert_eq!(first.low, 90.0);
        assert_eq!(first.close, 105.0);
        assert_eq!(first.volume, 50000);
    }

    #[test]
    fn parses_close_only_rows() {
        let content = "Date,Close\n2024-02-01, 10.5\n2024-02-02,11.25\n";
        let series = CsvAdapter::new().parse_str(content, "test").unwrap();

        assert_eq!(series.closes(), vec![10.5, 11.25]);
        assert_eq!(series.points()[0].high, 10.5);
        assert_eq!(series.points()[0].volume, 0);
    }

    #[test]
    fn skips_malformed_rows() {
        let content = "date,open,high,low,close,volume\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            15/01/2024,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,abc,100.0,110.0,60000\n\
            2024-01-17,110.0,120.0,105.0,115.0,-5\n\
            2024-01-18,110.0,120.0\n\
            2024-01-19,110.0,120.0,105.0,NaN,100\n\
            2024-01-20,110.0,120.0,105.0,116.0,100\n";
        let series = CsvAdapter::new().parse_str(content, "test").unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![105.0, 116.0]);
    }

    #[test]
    fn sorts_reverse_chronological_input() {
        let content = "date,close\n2024-01-03,3\n2024-01-02,2\n2024-01-01,1\n";
        let series = CsvAdapter::new().parse_str(content, "test").unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn no_valid_rows_is_error() {
        let err = CsvAdapter::new()
            .parse_str("date,close\nbad,row\n", "empty.csv")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::DataLoad { path, .. } if path == "empty.csv"));

        assert!(CsvAdapter::new().parse_str("date,close\n", "x").is_err());
    }

    #[test]
    fn missing_close_column_is_error() {
        let err = CsvAdapter::new()
            .parse_str("date\n2024-01-01\n", "x")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::DataLoad { reason, .. } if reason.contains("'close'")));

        let err = CsvAdapter::new()
            .parse_str("date,price\n2024-01-01,10\n", "x")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::DataLoad { reason, .. } if reason.contains("'close'")));
    }

    #[test]
    fn missing_date_column_is_error() {
        let err = CsvAdapter::new()
            .parse_str("day,close\n2024-01-01,10\n", "x")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::DataLoad { reason, .. } if reason.contains("'date'")));
    }

    #[test]
    fn reads_close_by_name_without_volume() {
        let content = "date,open,high,low,close\n\
            2024-01-01,100,110,90,105\n\
            2024-01-02,105,115,100,110\n";
        let series = CsvAdapter::new().parse_str(content, "test").unwrap();

        assert_eq!(series.closes(), vec![105.0, 110.0]);
        let first = &series.points()[0];
        assert_eq!(first.open, 100.0);
        assert_eq!(first.high, 110.0);
        assert_eq!(first.low, 90.0);
        assert_eq!(first.volume, 0);
    }

    #[test]
    fn ignores_adjusted_close_column() {
        let content = "Date,Open,High,Low,Close,Adj Close,Volume\n\
            2024-01-01,100,110,90,105,104.5,50000\n\
            2024-01-02,105,115,100,110,109.5,60000\n";
        let series = CsvAdapter::new().parse_str(content, "test").unwrap();

        assert_eq!(series.closes(), vec![105.0, 110.0]);
        assert_eq!(series.points()[1].volume, 60000);
    }

    #[test]
    fn columns_found_in_any_order() {
        let content = "Volume,CLOSE,low,High,open,Date\n7,12.5,11,13,12,2024-03-01\n";
        let series = CsvAdapter::new().parse_str(content, "test").unwrap();

        let p = &series.points()[0];
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!((p.open, p.high, p.low, p.close), (12.0, 13.0, 11.0, 12.5));
        assert_eq!(p.volume, 7);
    }

    #[test]
    fn partial_bar_columns_fall_back_to_close() {
        let content = "date,open,close\n2024-01-01,9,10\n";
        let series = CsvAdapter::new().parse_str(content, "test").unwrap();

        let p = &series.points()[0];
        assert_eq!(p.close, 10.0);
        assert_eq!(p.open, 10.0);
    }

    #[test]
    fn load_series_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, OHLCV).unwrap();

        let series = CsvAdapter::new().load_series(&path).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn load_series_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = CsvAdapter::new().load_series(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(AnalyzerError::DataLoad { .. })));
    }
}
