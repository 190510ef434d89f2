//! The chart batch: load → validate → render every catalog entry → report.
//!
//! Kept separate from `app` so the whole workflow can be exercised in tests
//! without going through argument parsing or the process exit code.

use std::fs::create_dir_all;

use tracing::{info, warn};

use crate::domain::{Dataset, PlotCatalog, RunConfig};
use crate::error::AppError;
use crate::io::{build_dataset, read_forecast_json};
use crate::plot::{RenderOptions, RenderOutcome, SeriesRenderer};
use crate::report::BatchReport;

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub report: BatchReport,
}

/// Execute one full run with the standard catalog.
pub fn run_batch(config: &RunConfig) -> Result<RunOutput, AppError> {
    let catalog = PlotCatalog::standard(&config.location);
    run_batch_with_catalog(config, &catalog)
}

/// Execute one full run against a given catalog.
pub fn run_batch_with_catalog(config: &RunConfig, catalog: &PlotCatalog) -> Result<RunOutput, AppError> {
    info!(input = %config.input.display(), "starting weather chart generation");

    // 1) Load and validate input. Any failure here is fatal.
    let root = read_forecast_json(&config.input)?;
    let dataset = build_dataset(&root, catalog, config.length_policy)?;

    // 2) Prepare output.
    create_dir_all(&config.output_dir).map_err(|e| {
        AppError::output(format!(
            "Failed to create output directory '{}': {e}",
            config.output_dir.display()
        ))
    })?;

    // 3) Render.
    let renderer = SeriesRenderer::new(RenderOptions::from_config(config));
    let report = render_catalog(&dataset, catalog, &renderer);

    Ok(RunOutput { dataset, report })
}

/// Render every catalog entry present in `dataset`, in catalog order.
///
/// Per-chart problems are logged and recorded; they never stop the batch.
pub fn render_catalog(dataset: &Dataset, catalog: &PlotCatalog, renderer: &SeriesRenderer) -> BatchReport {
    let mut report = BatchReport::default();

    for spec in catalog {
        if !dataset.contains(&spec.variable) {
            let reason = dataset
                .exclusion(&spec.variable)
                .map(|r| r.to_string())
                .unwrap_or_else(|| "data is missing".to_string());
            info!(variable = %spec.variable, %reason, "skipping chart");
            report.record_skipped(&spec.variable, reason);
            continue;
        }

        match renderer.render(dataset, spec) {
            Ok(RenderOutcome::Rendered(path)) => report.record_generated(path),
            Ok(RenderOutcome::Skipped(reason)) => {
                info!(variable = %spec.variable, %reason, "skipping chart");
                report.record_skipped(&spec.variable, reason);
            }
            Err(err) => {
                warn!(variable = %spec.variable, error = %err, "chart failed");
                report.record_failed(&spec.variable, err);
            }
        }
    }

    if report.is_empty_batch() {
        warn!("no chart files were generated");
    }

    report
}
