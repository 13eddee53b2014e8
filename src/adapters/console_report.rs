//! Plain-text console report.
//!
//! Absent moving averages print as `N/A`. A failed section prints its
//! heading followed by the error and the rest of the report continues.

use crate::domain::analysis::SeriesSummary;
use crate::domain::error::AnalyzerError;
use crate::domain::report::{
    AnalysisReport, MomentumSection, PrimarySection, SmaTable, SmaTableSection,
};
use crate::ports::report_port::ReportPort;
use std::io::Write;

const RULE: &str = "----------------------------------------";

#[derive(Debug, Default)]
pub struct ConsoleReport;

impl ConsoleReport {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for ConsoleReport {
    fn write(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<(), AnalyzerError> {
        writeln!(out, "Loaded {} days of price data", report.points)?;

        if let Some(summary) = &report.summary {
            write_summary(out, summary)?;
        }

        for section in &report.sma_tables {
            write_sma_section(out, section)?;
        }

        match &report.primary {
            Ok(primary) => write_primary(out, primary)?,
            Err(e) => {
                writeln!(out, "\n=== Signal Analysis ===")?;
                writeln!(out, "error: {}", e)?;
            }
        }

        match &report.momentum {
            Ok(momentum) => write_momentum(out, momentum)?,
            Err(e) => {
                writeln!(out, "\n=== Momentum ===")?;
                writeln!(out, "error: {}", e)?;
            }
        }

        Ok(())
    }
}

fn write_summary(out: &mut dyn Write, s: &SeriesSummary) -> std::io::Result<()> {
    writeln!(out, "\n=== Price Summary ===")?;
    writeln!(out, "Analysis Period: {} to {}", s.start_date, s.end_date)?;
    writeln!(
        out,
        "Price Change: ${:.2} ({:.2}%)",
        s.price_change, s.percent_change
    )?;
    writeln!(out, "Latest Price: ${:.2}", s.latest_close)?;
    writeln!(out, "Period High: ${:.2}", s.highest)?;
    writeln!(out, "Period Low: ${:.2}", s.lowest)?;
    writeln!(out, "Current vs High: {:.2}% below high", s.below_high_pct)
}

fn write_sma_section(out: &mut dyn Write, section: &SmaTableSection) -> std::io::Result<()> {
    writeln!(out, "\n=== {}-Day Simple Moving Average ===", section.window)?;
    match &section.table {
        Ok(table) => write_sma_table(out, section.window, table),
        Err(e) => writeln!(out, "error: {}", e),
    }
}

fn write_sma_table(out: &mut dyn Write, window: usize, table: &SmaTable) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<12} {:>10} {:>12}",
        "Date",
        "Close",
        format!("SMA({})", window)
    )?;
    writeln!(out, "{}", RULE)?;

    for row in &table.rows {
        let sma = match row.moving_average {
            Some(v) => format!("{:.2}", v),
            None => "N/A".to_string(),
        };
        writeln!(out, "{:<12} {:>10.2} {:>12}", row.date.to_string(), row.close, sma)?;
    }

    writeln!(
        out,
        "Summary: {} data points processed, {} moving averages calculated",
        table.total_rows, table.computed
    )
}

fn write_primary(out: &mut dyn Write, p: &PrimarySection) -> std::io::Result<()> {
    writeln!(out, "\n=== {}-Day Signal Analysis ===", p.window)?;
    writeln!(out, "Latest Date: {}", p.latest.date)?;
    writeln!(out, "Latest Close: ${:.2}", p.latest.close)?;
    if let Some(sma) = p.latest.moving_average {
        writeln!(out, "SMA({}): ${:.2}", p.window, sma)?;
    }

    let t = &p.tally;
    write!(
        out,
        "Signal Counts: BUY {}, SELL {}, HOLD {}",
        t.buy, t.sell, t.hold
    )?;
    if t.not_computable > 0 {
        write!(out, ", N/A {}", t.not_computable)?;
    }
    writeln!(out)?;

    writeln!(out, "Standard Deviation: {:.4}", p.metrics.standard_deviation)?;
    writeln!(out, "Bollinger Upper Band: {:.2}", p.metrics.upper_band)?;
    writeln!(out, "Bollinger Lower Band: {:.2}", p.metrics.lower_band)?;

    if let Some(signals) = &p.signals {
        writeln!(out, "Price Signal: {}", signals.price)?;
        writeln!(out, "Bollinger Band Position: {}", signals.band)?;
    }
    Ok(())
}

fn write_momentum(out: &mut dyn Write, m: &MomentumSection) -> std::io::Result<()> {
    writeln!(out, "\n=== Momentum ===")?;
    writeln!(out, "RSI ({}, {}): {:.2}", m.period, m.method, m.rsi)?;
    writeln!(out, "RSI Signal: {}", m.signal)
}
