//! Data access port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::price::PriceSeries;
use std::path::Path;

pub trait DataPort {
    /// Loads a chronologically ascending series from `path`.
    fn load_series(&self, path: &Path) -> Result<PriceSeries, AnalyzerError>;
}
