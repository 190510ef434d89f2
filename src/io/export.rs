//! Export the batch report as JSON.
//!
//! Meant for pipeline steps that need a machine-readable list of produced
//! charts; the printed summary is for humans only.

use std::fs::File;
use std::path::Path;

use crate::error::AppError;
use crate::report::BatchReport;

/// Write the batch report to a pretty-printed JSON file.
pub fn write_report_json(path: &Path, report: &BatchReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::output(format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut report = BatchReport::default();
        report.record_generated(PathBuf::from("temperature_chart.png"));
        write_report_json(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["generated"][0], "temperature_chart.png");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_report_json(&dir.path().join("missing/report.json"), &BatchReport::default())
            .unwrap_err();
        assert!(err.message().contains("Failed to create report JSON"));
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
