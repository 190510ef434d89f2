//! Command-line parsing for the chart generator.
//!
//! Every option has a default matching the built-in configuration, so
//! running `wxc` with no arguments reads `weather_data.json` and writes PNGs
//! into the current directory. Most options can also come from the
//! environment (or a `.env` file).

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{LengthPolicy, OutputFormat};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(name = "wxc", version, about = "Render hourly weather forecast charts from a JSON file")]
pub struct Cli {
    /// Forecast JSON file (`{"hourly": {"time": [...], ...}}`).
    #[arg(short, long, env = "WXC_INPUT", default_value = "weather_data.json")]
    pub input: PathBuf,

    /// Directory the charts are written to (created if missing).
    #[arg(short, long, env = "WXC_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Place name shown in chart titles (empty to omit).
    #[arg(long, env = "WXC_LOCATION", default_value = "Shanghai")]
    pub location: String,

    /// Image format of the charts.
    #[arg(long, value_enum, env = "WXC_FORMAT", default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1500)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 700)]
    pub height: u32,

    /// What to do with series whose length differs from `hourly.time`.
    #[arg(long = "length-mismatch", value_enum, env = "WXC_LENGTH_MISMATCH", default_value_t = LengthPolicy::Exclude)]
    pub length_policy: LengthPolicy,

    /// Exit with a non-zero status when no chart was produced.
    #[arg(long)]
    pub fail_on_empty: bool,

    /// Also write the batch report (generated/skipped/failed) as JSON.
    #[arg(long, value_name = "JSON")]
    pub report_json: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
