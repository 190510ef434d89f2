//! Top-level application orchestration.
//!
//! `src/main.rs` only maps the result to an exit code; this module is the
//! "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the chart batch
//! - prints the summary and writes the optional JSON report

use clap::Parser;
use tracing::warn;

use crate::cli::Cli;
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `wxc` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    crate::logging::init(&cli.log_level);

    let config = run_config_from_args(&cli);
    let run = pipeline::run_batch(&config)?;

    println!("{}", crate::report::format_run_summary(&run.dataset, &run.report));
    finish(&config, &run)
}

/// Post-batch steps: the optional JSON report, then the empty-batch decision.
pub fn finish(config: &RunConfig, run: &pipeline::RunOutput) -> Result<(), AppError> {
    if let Some(path) = &config.report_json {
        crate::io::export::write_report_json(path, &run.report)?;
    }

    if run.report.is_empty_batch() {
        if config.fail_on_empty {
            return Err(AppError::empty_batch());
        }
        warn!("finished without producing any chart");
    }

    Ok(())
}

pub fn run_config_from_args(cli: &Cli) -> RunConfig {
    RunConfig {
        input: cli.input.clone(),
        output_dir: cli.output_dir.clone(),
        location: cli.location.clone(),
        format: cli.format,
        width: cli.width,
        height: cli.height,
        length_policy: cli.length_policy,
        fail_on_empty: cli.fail_on_empty,
        report_json: cli.report_json.clone(),
    }
}
