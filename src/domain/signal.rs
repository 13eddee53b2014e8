//! Trading signal classification.
//!
//! Thresholds:
//! - price vs SMA: strict comparison, equality is HOLD
//! - RSI: strictly above 70 is OVERBOUGHT, strictly below 30 is OVERSOLD
//! - close vs bands: inclusive, touching a band counts as that band

use crate::domain::indicator::{AdvancedMetrics, WindowedResult};
use std::fmt;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceSignal {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandPosition {
    UpperBand,
    LowerBand,
    Middle,
}

pub fn price_signal(close: f64, sma: f64) -> PriceSignal {
    if close > sma {
        PriceSignal::Buy
    } else if close < sma {
        PriceSignal::Sell
    } else {
        PriceSignal::Hold
    }
}

pub fn rsi_signal(rsi: f64) -> RsiSignal {
    if rsi > RSI_OVERBOUGHT {
        RsiSignal::Overbought
    } else if rsi < RSI_OVERSOLD {
        RsiSignal::Oversold
    } else {
        RsiSignal::Neutral
    }
}

pub fn band_position(close: f64, upper: f64, lower: f64) -> BandPosition {
    if close >= upper {
        BandPosition::UpperBand
    } else if close <= lower {
        BandPosition::LowerBand
    } else {
        BandPosition::Middle
    }
}

/// BUY/SELL/HOLD counts over a moving-average series.
///
/// Points without an average are counted in `not_computable` and never
/// classified, so `buy + sell + hold + not_computable` is the series length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalTally {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
    pub not_computable: usize,
}

impl SignalTally {
    pub fn total(&self) -> usize {
        self.buy + self.sell + self.hold + self.not_computable
    }

    pub fn classified(&self) -> usize {
        self.buy + self.sell + self.hold
    }
}

pub fn tally_price_signals(results: &[WindowedResult]) -> SignalTally {
    let mut buy = 0;
    let mut sell = 0;
    let mut classified = 0;

    for r in results {
        let Some(sma) = r.moving_average else {
            continue;
        };
        classified += 1;
        match price_signal(r.close, sma) {
            PriceSignal::Buy => buy += 1,
            PriceSignal::Sell => sell += 1,
            PriceSignal::Hold => {}
        }
    }

    SignalTally {
        buy,
        sell,
        hold: classified - buy - sell,
        not_computable: results.len() - classified,
    }
}

/// Signals for the most recent point of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestSignals {
    pub price: PriceSignal,
    pub rsi: RsiSignal,
    pub band: BandPosition,
}

/// Classifies `latest` against its own SMA and the computed metrics.
///
/// Returns `None` when `latest` has no moving average.
pub fn classify_latest(latest: &WindowedResult, metrics: &AdvancedMetrics) -> Option<LatestSignals> {
    let sma = latest.moving_average?;
    Some(LatestSignals {
        price: price_signal(latest.close, sma),
        rsi: rsi_signal(metrics.rsi),
        band: band_position(latest.close, metrics.upper_band, metrics.lower_band),
    })
}

impl fmt::Display for PriceSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSignal::Buy => write!(f, "BUY"),
            PriceSignal::Sell => write!(f, "SELL"),
            PriceSignal::Hold => write!(f, "HOLD"),
        }
    }
}

impl fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiSignal::Overbought => write!(f, "OVERBOUGHT"),
            RsiSignal::Oversold => write!(f, "OVERSOLD"),
            RsiSignal::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl fmt::Display for BandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandPosition::UpperBand => write!(f, "UPPER BAND"),
            BandPosition::LowerBand => write!(f, "LOWER BAND"),
            BandPosition::Middle => write!(f, "MIDDLE"),
        }
    }
}
