//! Analysis configuration, read from the `[analysis]` section and validated up front.

use crate::domain::error::AnalyzerError;
use crate::domain::indicator::rsi::{RsiMethod, RSI_DEFAULT_PERIOD};
use crate::domain::indicator::{WarmupPolicy, DEFAULT_WINDOW};
use crate::ports::config_port::ConfigPort;

const SECTION: &str = "analysis";

pub const DEFAULT_SMA_PERIODS: [usize; 3] = [5, 10, 20];
pub const DEFAULT_DISPLAY_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Window for the primary SMA, bands, and signals.
    pub window: usize,
    /// Windows for the SMA tables.
    pub sma_periods: Vec<usize>,
    pub rsi_period: usize,
    pub rsi_method: RsiMethod,
    pub warmup: WarmupPolicy,
    /// Trailing rows shown per SMA table.
    pub display_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            sma_periods: DEFAULT_SMA_PERIODS.to_vec(),
            rsi_period: RSI_DEFAULT_PERIOD,
            rsi_method: RsiMethod::default(),
            warmup: WarmupPolicy::default(),
            display_rows: DEFAULT_DISPLAY_ROWS,
        }
    }
}

pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, AnalyzerError> {
    let defaults = AnalysisConfig::default();

    let sma_periods = match config.get_list(SECTION, "sma_periods") {
        Some(items) => {
            let periods = items
                .iter()
                .map(|s| parse_positive("sma_periods", s))
                .collect::<Result<Vec<_>, _>>()?;
            if periods.is_empty() {
                return Err(invalid("sma_periods", "at least one period is required"));
            }
            periods
        }
        None => defaults.sma_periods,
    };

    Ok(AnalysisConfig {
        window: positive_or(config, "window", defaults.window)?,
        sma_periods,
        rsi_period: positive_or(config, "rsi_period", defaults.rsi_period)?,
        rsi_method: parsed_or(config, "rsi_method", defaults.rsi_method)?,
        warmup: parsed_or(config, "warmup", defaults.warmup)?,
        display_rows: positive_or(config, "display_rows", defaults.display_rows)?,
    })
}

fn positive_or(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, AnalyzerError> {
    match config.get_string(SECTION, key) {
        Some(raw) => parse_positive(key, &raw),
        None => Ok(default),
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize, AnalyzerError> {
    match raw.trim().parse::<i64>() {
        Ok(v) if v > 0 => Ok(v as usize),
        Ok(_) => Err(invalid(key, &format!("{} must be positive", key))),
        Err(_) => Err(invalid(key, &format!("'{}' is not an integer", raw.trim()))),
    }
}

fn parsed_or<T>(config: &dyn ConfigPort, key: &str, default: T) -> Result<T, AnalyzerError>
where
    T: std::str::FromStr<Err = String>,
{
    match config.get_string(SECTION, key) {
        Some(raw) => raw.parse().map_err(|reason: String| invalid(key, &reason)),
        None => Ok(default),
    }
}

fn invalid(key: &str, reason: &str) -> AnalyzerError {
    AnalyzerError::ConfigInvalid {
        section: SECTION.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
