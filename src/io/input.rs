//! Read the forecast JSON document.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::AppError;

/// Open and parse the input file.
///
/// The document is kept as a loosely typed `Value`: the dataset builder decides
/// per variable what is usable, so a strict schema here would turn per-item
/// problems into fatal ones.
pub fn read_forecast_json(path: &Path) -> Result<Value, AppError> {
    if !path.exists() {
        return Err(AppError::input(format!(
            "Input file '{}' not found.",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open '{}': {e}", path.display())))?;

    let value: Value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::input(format!(
            "Failed to decode JSON from '{}'. Is it valid JSON? ({e})",
            path.display()
        ))
    })?;

    debug!(path = %path.display(), "parsed input JSON");
    Ok(value)
}
