//! Technical indicator engines and the value types they produce.
//!
//! - `WindowedResult`: one point of a moving-average series, with the average
//!   absent until a full window is available
//! - `AdvancedMetrics`: volatility bands and RSI for the most recent window
//! - `WarmupPolicy`: how short series and the warm-up prefix are reported

pub mod bollinger;
pub mod rsi;
pub mod sma;
pub mod stddev;

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WINDOW: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowedResult {
    pub date: NaiveDate,
    pub close: f64,
    /// `None` means "not yet computable", never zero.
    pub moving_average: Option<f64>,
}

impl WindowedResult {
    pub fn is_computable(&self) -> bool {
        self.moving_average.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvancedMetrics {
    pub standard_deviation: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    pub rsi: f64,
}

/// Reporting of points that precede the first full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarmupPolicy {
    /// Short series fail with `InsufficientData`; only full-window points are emitted.
    #[default]
    Strict,
    /// Every point is emitted; warm-up points carry no average.
    Padded,
}

impl FromStr for WarmupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(WarmupPolicy::Strict),
            "padded" | "partial" => Ok(WarmupPolicy::Padded),
            other => Err(format!("unknown warmup policy '{}'", other)),
        }
    }
}

impl fmt::Display for WarmupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarmupPolicy::Strict => write!(f, "strict"),
            WarmupPolicy::Padded => write!(f, "padded"),
        }
    }
}
