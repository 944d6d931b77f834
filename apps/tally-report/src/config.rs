//! Report CLI configuration.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     tally-report data.json -f table -o report.txt                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TALLY_INPUT, TALLY_OUTPUT, TALLY_FORMAT, TALLY_PRETTY              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     stdout, json, compact                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logging is configured separately through `TALLY_LOG` (see `main.rs`).

use std::path::PathBuf;

/// Usage text printed for `-h/--help`.
pub const USAGE: &str = "\
Tally seller performance report

Usage: tally-report [OPTIONS] <DATASET>

Arguments:
  <DATASET>              Dataset JSON file (env: TALLY_INPUT)

Options:
  -o, --output <PATH>    Write the report to a file instead of stdout (env: TALLY_OUTPUT)
  -f, --format <FORMAT>  Output format: json | table (default: json, env: TALLY_FORMAT)
      --pretty           Pretty-print JSON output (env: TALLY_PRETTY=true)
  -h, --help             Show this help message

Logging:
  TALLY_LOG=debug        Log filter (falls back to RUST_LOG, default: info)";

// =============================================================================
// Output Format
// =============================================================================

/// How the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON envelope with the report rows.
    #[default]
    Json,
    /// One aligned text line per seller.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" | "text" => Ok(OutputFormat::Table),
            other => Err(ConfigError::InvalidValue {
                key: "format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Report Config
// =============================================================================

/// Resolved configuration for one CLI run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Dataset JSON file.
    pub input: PathBuf,

    /// Report destination, `None` for stdout.
    pub output: Option<PathBuf>,

    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(ReportConfig),
}

impl ReportConfig {
    /// Loads configuration from the process arguments and environment.
    pub fn load() -> Result<Invocation, ConfigError> {
        Self::resolve(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Resolves configuration from explicit arguments and an environment lookup.
    ///
    /// `args` excludes the program name.
    pub fn resolve<I, E>(args: I, env: E) -> Result<Invocation, ConfigError>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut input: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;
        let mut format: Option<OutputFormat> = None;
        let mut pretty = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "-o" | "--output" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    output = Some(PathBuf::from(value));
                }
                "-f" | "--format" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    format = Some(value.parse()?);
                }
                "--pretty" => pretty = true,
                flag if flag.starts_with('-') => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()));
                }
                path => {
                    if input.is_some() {
                        return Err(ConfigError::UnexpectedArgument(path.to_string()));
                    }
                    input = Some(PathBuf::from(path));
                }
            }
        }

        let input = input
            .or_else(|| env("TALLY_INPUT").map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired("DATASET".to_string()))?;

        let output = output.or_else(|| env("TALLY_OUTPUT").map(PathBuf::from));

        let format = match format {
            Some(format) => format,
            None => env("TALLY_FORMAT")
                .map(|value| value.parse::<OutputFormat>())
                .transpose()?
                .unwrap_or_default(),
        };

        if !pretty {
            if let Some(value) = env("TALLY_PRETTY") {
                pretty = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TALLY_PRETTY".to_string(),
                    value,
                })?;
            }
        }

        Ok(Invocation::Run(ReportConfig {
            input,
            output,
            format,
            pretty,
        }))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Flag {0} expects a value")]
    MissingValue(String),

    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
