//! Bollinger Bands.
//!
//! - Middle: the latest SMA
//! - Upper: Middle + 2 × StdDev
//! - Lower: Middle - 2 × StdDev
//!
//! StdDev is the population deviation of the same window. A zero deviation
//! collapses all three bands onto the SMA.

/// Band half-width in standard deviations.
pub const BAND_SIGMAS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

pub fn compute_bands(sma: f64, stddev: f64) -> Bands {
    let offset = BAND_SIGMAS * stddev;
    Bands {
        upper: sma + offset,
        middle: sma,
        lower: sma - offset,
    }
}
