//! Report Pipeline
//! Loads the benchmark results, saves the PDF chart and optionally shows it.

use crate::charts::axis::unplottable_count;
use crate::charts::{ChartStyle, RenderError, StaticChartRenderer};
use crate::data::{load_series, BenchmarkSeries, LoaderError};
use crate::gui;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_INPUT: &str = "benchmark_results.txt";
pub const DEFAULT_OUTPUT: &str = "enclaveInitBench2.pdf";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// How the saved chart is presented after writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayMode {
    /// Built-in viewer window, blocks until closed
    #[default]
    Window,
    /// Hand the PDF to the system's default viewer
    System,
    /// Save only
    None,
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub display: DisplayMode,
    pub style: ChartStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            display: DisplayMode::default(),
            style: ChartStyle::default(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub rows: usize,
    pub output: PathBuf,
    pub bytes: usize,
}

pub struct Reporter {
    config: ReportConfig,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Parse, render and save, then present the chart as configured.
    pub fn run(&self) -> Result<ReportSummary, ReportError> {
        self.run_with(present)
    }

    /// Like [`Reporter::run`], with the presentation step supplied by the caller.
    /// The PDF is only written once the whole chart rendered. A presentation
    /// failure is logged and does not fail the run.
    pub fn run_with<F>(&self, present: F) -> Result<ReportSummary, ReportError>
    where
        F: FnOnce(&ReportConfig, BenchmarkSeries) -> Result<(), String>,
    {
        let config = &self.config;

        tracing::info!(input = %config.input.display(), "loading benchmark results");
        let series = load_series(&config.input)?;
        if series.is_empty() {
            tracing::warn!("input has no data rows; saving an empty chart");
        }
        let skipped = unplottable_count(series.values());
        if skipped > 0 {
            tracing::warn!(skipped, "values <= 0 cannot be drawn on a log axis and are left out");
        }

        let bytes = StaticChartRenderer::save_pdf(&series, &config.style, &config.output)?;
        tracing::info!(
            output = %config.output.display(),
            rows = series.len(),
            bytes,
            "chart saved"
        );

        let summary = ReportSummary {
            rows: series.len(),
            output: config.output.clone(),
            bytes,
        };

        if let Err(reason) = present(config, series) {
            tracing::warn!(
                output = %config.output.display(),
                display = ?config.display,
                %reason,
                "chart saved but could not be displayed"
            );
        }

        Ok(summary)
    }
}

/// Show the saved chart the way `config.display` asks for.
fn present(config: &ReportConfig, series: BenchmarkSeries) -> Result<(), String> {
    match config.display {
        DisplayMode::Window => gui::show(series, config.style).map_err(|e| e.to_string()),
        DisplayMode::System => open::that(&config.output).map_err(|e| e.to_string()),
        DisplayMode::None => Ok(()),
    }
}
