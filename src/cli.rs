//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sample_data::{self, DEFAULT_BASE_PRICE, DEFAULT_DAYS};
use crate::domain::config::{build_analysis_config, AnalysisConfig};
use crate::domain::error::AnalyzerError;
use crate::domain::indicator::DEFAULT_WINDOW;
use crate::domain::report::build_report;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "stockta",
    about = "Moving averages, Bollinger Bands, RSI and trading signals for daily prices"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a price CSV file
    Analyze {
        /// CSV file with date,open,high,low,close,volume or date,close columns
        file: PathBuf,
        /// Primary SMA window; values <= 0 fall back to 20
        #[arg(allow_negative_numbers = true)]
        window: Option<i64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate a sample price CSV file
    Generate {
        #[arg(short, long, default_value = "sample_stock_data.csv")]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: usize,
        /// First date (YYYY-MM-DD); defaults to `days` days ago
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            file,
            window,
            config,
        } => run_analyze(&file, window, config.as_deref()),
        Command::Generate {
            output,
            days,
            start,
            seed,
        } => run_generate(&output, days, start, seed),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, AnalyzerError> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    info!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| AnalyzerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    build_analysis_config(&adapter)
}

/// Window from the command line, falling back to `configured` when absent.
///
/// Non-positive values are replaced by [`DEFAULT_WINDOW`] with a warning.
pub fn resolve_window(arg: Option<i64>, configured: usize) -> usize {
    match arg {
        None => configured,
        Some(w) if w > 0 => w as usize,
        Some(w) => {
            warn!(
                window = w,
                default = DEFAULT_WINDOW,
                "window must be positive, using default"
            );
            DEFAULT_WINDOW
        }
    }
}

fn run_analyze(file: &Path, window: Option<i64>, config_path: Option<&Path>) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    config.window = resolve_window(window, config.window);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let data_port = CsvAdapter::new();
    let report_port = ConsoleReport::new();

    match run_analysis_pipeline(&data_port, &report_port, file, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load, analyze, and render one series.
///
/// Only loading and writing can fail; indicator failures are reported inside
/// their own report sections.
pub fn run_analysis_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    file: &Path,
    config: &AnalysisConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyzerError> {
    let series = data_port.load_series(file)?;
    info!(
        points = series.len(),
        window = config.window,
        warmup = %config.warmup,
        "analyzing series"
    );

    let report = build_report(&series, config);

    for section in &report.sma_tables {
        if let Err(e) = &section.table {
            warn!(window = section.window, error = %e, "SMA section skipped");
        }
    }
    if let Err(e) = &report.primary {
        warn!(window = config.window, error = %e, "signal analysis skipped");
    }

    report_port.write(&report, out)?;
    out.flush()?;
    Ok(())
}

fn run_generate(
    output: &Path,
    days: usize,
    start: Option<NaiveDate>,
    seed: Option<u64>,
) -> ExitCode {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let generated = default_start(start, days, Local::now().date_naive()).and_then(|start| {
        let series = sample_data::generate_series(&mut rng, start, days, DEFAULT_BASE_PRICE)?;
        sample_data::write_csv(output, &series)
    });

    match generated {
        Ok(()) => {
            eprintln!("Sample data generated: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// First generated date: `start` if given, else `days` days before `today`.
fn default_start(
    start: Option<NaiveDate>,
    days: usize,
    today: NaiveDate,
) -> Result<NaiveDate, AnalyzerError> {
    if let Some(start) = start {
        return Ok(start);
    }
    i64::try_from(days)
        .ok()
        .and_then(|n| sample_data::shift_days(today, -n))
        .ok_or(AnalyzerError::DateOutOfRange { start: today, days })
}
