//! Enclave Bench Plot - log-scale chart of enclave initialisation benchmarks
//!
//! Reads `label,value` rows from a results file, saves a PDF line chart with a
//! log10 y-axis and optionally shows it in a viewer window.

mod bootstrap;
mod charts;
mod data;
mod gui;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use report::{DisplayMode, ReportConfig, Reporter, DEFAULT_INPUT, DEFAULT_OUTPUT};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Plot enclave initialisation benchmark results on a log scale")]
struct Cli {
    /// Comma separated `label,value` results file
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to save the PDF chart
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// How to present the chart after saving
    #[arg(long, value_enum, default_value_t = DisplayMode::Window)]
    display: DisplayMode,

    /// Log filter directive (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        ReportConfig {
            input: self.input,
            output: self.output,
            display: self.display,
            ..ReportConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::setup_logging(&cli.log_level);

    let config = cli.into_config();
    let input = config.input.clone();

    let summary = Reporter::new(config)
        .run()
        .with_context(|| format!("failed to plot {}", input.display()))?;

    tracing::info!(
        rows = summary.rows,
        bytes = summary.bytes,
        output = %summary.output.display(),
        "done"
    );
    Ok(())
}
