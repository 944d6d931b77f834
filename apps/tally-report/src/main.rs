//! # Tally Report CLI
//!
//! Loads a dataset JSON file, runs the seller performance engine with the
//! reference policies and writes the report.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportConfig::load ──► read dataset ──► Dataset::from_json            │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                      SalesReport::generate (tally-core, pure)          │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                       render (json | table) ──► stdout or --output     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so stdout carries only the report.

mod config;
mod error;
mod render;

use std::io::Write;
use std::process::ExitCode;

use chrono::Utc;
use tally_core::{Dataset, ReportError, ReportOptions, SalesReport, ValidationError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Invocation, ReportConfig, USAGE};
use crate::error::{AppError, AppResult};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "report failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr subscriber.
///
/// ## Log Levels
/// - `TALLY_LOG=debug` - Stage summaries and per-seller ranking
/// - `TALLY_LOG=tally_core=trace` - Every folded line item
/// - Falls back to `RUST_LOG`, then INFO
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TALLY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run() -> AppResult<()> {
    let config = match ReportConfig::load()? {
        Invocation::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Invocation::Run(config) => config,
    };

    info!(
        input = %config.input.display(),
        format = %config.format,
        "Configuration loaded"
    );

    let raw = std::fs::read_to_string(&config.input).map_err(|source| AppError::Read {
        path: config.input.clone(),
        source,
    })?;

    let dataset = Dataset::from_json(&raw)
        .map_err(ReportError::from)?
        .ok_or(ReportError::from(ValidationError::MissingDataset))?;

    let report = SalesReport::generate(&dataset, &ReportOptions::reference())?;
    info!(
        sellers = report.len(),
        total_profit = %report.total_profit(),
        total_bonus = %report.total_bonus(),
        "Report computed"
    );

    let rendered = render::render(&report, config.format, config.pretty, Utc::now())?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|source| AppError::Write {
                path: path.clone(),
                source,
            })?;
            info!(output = %path.display(), "Report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
