//! Human-readable run summaries printed to stdout.

use crate::domain::Dataset;
use crate::report::BatchReport;

/// Multi-line summary of the dataset and the batch outcome.
pub fn format_run_summary(dataset: &Dataset, report: &BatchReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Parsed {} hourly data points ({} to {}).\n",
        dataset.len(),
        dataset
            .time
            .first()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
        dataset
            .time
            .last()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    ));
    out.push_str(&format!("Available data columns: {}\n", dataset.columns().join(", ")));

    if !report.skipped.is_empty() {
        out.push_str("Skipped:\n");
        for s in &report.skipped {
            out.push_str(&format!("  - {}: {}\n", s.variable, s.reason));
        }
    }

    if !report.failed.is_empty() {
        out.push_str("Failed:\n");
        for f in &report.failed {
            out.push_str(&format!("  - {}: {}\n", f.variable, f.error));
        }
    }

    out.push_str(&format_generated(report));
    out
}

/// The final status line.
pub fn format_generated(report: &BatchReport) -> String {
    if report.is_empty_batch() {
        return "No chart files were generated.".to_string();
    }

    let files: Vec<String> = report
        .generated
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    format!(
        "Chart generation finished. Generated {} file(s): {}",
        files.len(),
        files.join(", ")
    )
}
