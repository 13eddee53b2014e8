//! Report assembly: runs every indicator section over one series.
//!
//! Sections are independent. A section that fails keeps its error and the
//! remaining sections still run; RSI in particular never depends on the SMA
//! sections succeeding.

use crate::domain::analysis::{compute_advanced_metrics, summarize, SeriesSummary};
use crate::domain::config::AnalysisConfig;
use crate::domain::error::AnalyzerError;
use crate::domain::indicator::rsi::{compute_rsi_with, RsiMethod};
use crate::domain::indicator::sma::compute_sma;
use crate::domain::indicator::{AdvancedMetrics, WindowedResult};
use crate::domain::price::PriceSeries;
use crate::domain::signal::{
    classify_latest, rsi_signal, tally_price_signals, LatestSignals, RsiSignal, SignalTally,
};

#[derive(Debug)]
pub struct AnalysisReport {
    pub points: usize,
    pub summary: Option<SeriesSummary>,
    pub sma_tables: Vec<SmaTableSection>,
    pub primary: Result<PrimarySection, AnalyzerError>,
    pub momentum: Result<MomentumSection, AnalyzerError>,
}

#[derive(Debug)]
pub struct SmaTableSection {
    pub window: usize,
    pub table: Result<SmaTable, AnalyzerError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmaTable {
    /// Trailing rows, oldest first.
    pub rows: Vec<WindowedResult>,
    pub total_rows: usize,
    pub computed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimarySection {
    pub window: usize,
    pub latest: WindowedResult,
    pub metrics: AdvancedMetrics,
    pub signals: Option<LatestSignals>,
    pub tally: SignalTally,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumSection {
    pub period: usize,
    pub method: RsiMethod,
    pub rsi: f64,
    pub signal: RsiSignal,
}

pub fn build_report(series: &PriceSeries, config: &AnalysisConfig) -> AnalysisReport {
    AnalysisReport {
        points: series.len(),
        summary: summarize(series),
        sma_tables: config
            .sma_periods
            .iter()
            .map(|&window| SmaTableSection {
                window,
                table: build_sma_table(series, window, config),
            })
            .collect(),
        primary: build_primary(series, config),
        momentum: build_momentum(series, config),
    }
}

fn build_sma_table(
    series: &PriceSeries,
    window: usize,
    config: &AnalysisConfig,
) -> Result<SmaTable, AnalyzerError> {
    let results = compute_sma(series, window, config.warmup)?;
    let computed = results.iter().filter(|r| r.is_computable()).count();
    let start = results.len().saturating_sub(config.display_rows);

    Ok(SmaTable {
        total_rows: results.len(),
        computed,
        rows: results[start..].to_vec(),
    })
}

fn build_primary(
    series: &PriceSeries,
    config: &AnalysisConfig,
) -> Result<PrimarySection, AnalyzerError> {
    let results = compute_sma(series, config.window, config.warmup)?;
    let metrics = compute_advanced_metrics(
        series,
        &results,
        config.window,
        config.rsi_period,
        config.rsi_method,
    )?;

    let latest = results
        .last()
        .cloned()
        .ok_or(AnalyzerError::InsufficientData {
            points: series.len(),
            required: config.window,
        })?;

    Ok(PrimarySection {
        window: config.window,
        signals: classify_latest(&latest, &metrics),
        tally: tally_price_signals(&results),
        latest,
        metrics,
    })
}

fn build_momentum(
    series: &PriceSeries,
    config: &AnalysisConfig,
) -> Result<MomentumSection, AnalyzerError> {
    let rsi = compute_rsi_with(series, config.rsi_period, config.rsi_method)?;
    Ok(MomentumSection {
        period: config.rsi_period,
        method: config.rsi_method,
        rsi,
        signal: rsi_signal(rsi),
    })
}
