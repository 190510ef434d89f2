//! Turn the raw `hourly` JSON object into a validated `Dataset`.
//!
//! Problems with the time axis are fatal (`AppError::malformed_input`); problems
//! with an individual variable only drop that variable and are recorded in
//! `Dataset::excluded`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::domain::{Dataset, Exclusion, ExclusionReason, LengthPolicy, PlotCatalog, Series};
use crate::error::AppError;

/// Naive formats tried in order before falling back to RFC 3339 and bare dates.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Build the dataset for every variable named in `catalog`.
pub fn build_dataset(
    root: &Value,
    catalog: &PlotCatalog,
    policy: LengthPolicy,
) -> Result<Dataset, AppError> {
    let hourly = root
        .get("hourly")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::malformed_input("JSON structure is missing the 'hourly' object."))?;

    let time = parse_time_axis(hourly)?;

    let mut dataset = Dataset {
        time,
        series: Vec::new(),
        excluded: Vec::new(),
    };

    for variable in catalog.variables() {
        match extract_series(variable, hourly.get(variable), dataset.len(), policy) {
            Ok(series) => dataset.series.push(series),
            Err(reason) => {
                warn!(variable, %reason, "skipping variable");
                dataset.excluded.push(Exclusion {
                    variable: variable.to_string(),
                    reason,
                });
            }
        }
    }

    info!(points = dataset.len(), "parsed hourly data points");
    info!(columns = %dataset.columns().join(", "), "available data columns");

    Ok(dataset)
}

fn parse_time_axis(hourly: &Map<String, Value>) -> Result<Vec<NaiveDateTime>, AppError> {
    let raw = hourly
        .get("time")
        .ok_or_else(|| AppError::malformed_input("JSON structure is missing the 'hourly.time' key."))?;

    let items = raw
        .as_array()
        .ok_or_else(|| AppError::malformed_input("'hourly.time' is not a list."))?;

    if items.is_empty() {
        return Err(AppError::malformed_input("No time data found: 'hourly.time' is empty."));
    }

    let mut time = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let text = item.as_str().ok_or_else(|| {
            AppError::malformed_input(format!("'hourly.time[{idx}]' is not a string: {item}"))
        })?;
        let ts = parse_timestamp(text).ok_or_else(|| {
            AppError::malformed_input(format!("'hourly.time[{idx}]' is not a valid timestamp: '{text}'"))
        })?;
        time.push(ts);
    }

    if let Some(idx) = time.windows(2).position(|w| w[1] < w[0]) {
        return Err(AppError::malformed_input(format!(
            "'hourly.time' is not in ascending order (at index {}).",
            idx + 1
        )));
    }

    Ok(time)
}

/// Parse an ISO-8601-like timestamp into naive (UTC) time.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    for fmt in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.naive_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn extract_series(
    variable: &str,
    raw: Option<&Value>,
    expected_len: usize,
    policy: LengthPolicy,
) -> Result<Series, ExclusionReason> {
    let items = match raw {
        None => return Err(ExclusionReason::Absent),
        Some(Value::Null) => return Err(ExclusionReason::Null),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ExclusionReason::NotASequence),
    };

    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Null => values.push(None),
            Value::Number(n) => values.push(n.as_f64()),
            _ => return Err(ExclusionReason::NonNumeric { index }),
        }
    }

    if values.len() != expected_len {
        let mismatch = ExclusionReason::LengthMismatch {
            expected: expected_len,
            actual: values.len(),
        };
        match policy {
            LengthPolicy::Exclude => return Err(mismatch),
            LengthPolicy::Align => {
                warn!(variable, %mismatch, "aligning series to the time axis");
                values.resize(expected_len, None);
            }
        }
    }

    if values.iter().all(Option::is_none) {
        return Err(ExclusionReason::AllNull);
    }

    Ok(Series {
        name: variable.to_string(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{PlotKind, PlotSpec, QuantityKind};
    use crate::error::EXIT_MALFORMED_INPUT;

    fn hours(n: usize) -> Vec<String> {
        (0..n).map(|h| format!("2024-05-01T{h:02}:00")).collect()
    }

    fn catalog() -> PlotCatalog {
        PlotCatalog::standard("Test")
    }

    #[test]
    fn parses_open_meteo_style_document() {
        let root = json!({
            "latitude": 31.2,
            "hourly": {
                "time": hours(3),
                "temperature_2m": [10.0, 12.5, 9.0],
                "cloud_cover": [0, 50, null],
            }
        });
        let ds = build_dataset(&root, &catalog(), LengthPolicy::Exclude).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.columns(), vec!["time", "temperature_2m", "cloud_cover"]);
        assert_eq!(
            ds.series("cloud_cover").unwrap().values,
            vec![Some(0.0), Some(50.0), None]
        );
        assert_eq!(ds.exclusion("precipitation"), Some(&ExclusionReason::Absent));
    }

    #[test]
    fn missing_hourly_is_malformed() {
        let err = build_dataset(&json!({"daily": {}}), &catalog(), LengthPolicy::Exclude).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_MALFORMED_INPUT);
        assert!(err.message().contains("'hourly'"));
    }

    #[test]
    fn missing_or_empty_time_is_malformed() {
        let no_time = json!({"hourly": {"temperature_2m": [1.0]}});
        assert!(build_dataset(&no_time, &catalog(), LengthPolicy::Exclude)
            .unwrap_err()
            .is_malformed_input());

        let empty = json!({"hourly": {"time": []}});
        assert!(build_dataset(&empty, &catalog(), LengthPolicy::Exclude)
            .unwrap_err()
            .is_malformed_input());

        let garbage = json!({"hourly": {"time": ["2024-05-01T00:00", "yesterday"]}});
        let err = build_dataset(&garbage, &catalog(), LengthPolicy::Exclude).unwrap_err();
        assert!(err.message().contains("time[1]"));
    }

    #[test]
    fn unordered_time_is_malformed() {
        let root = json!({"hourly": {"time": ["2024-05-01T02:00", "2024-05-01T01:00"]}});
        let err = build_dataset(&root, &catalog(), LengthPolicy::Exclude).unwrap_err();
        assert!(err.message().contains("ascending"));
    }

    #[test]
    fn null_and_non_numeric_series_are_excluded() {
        let root = json!({
            "hourly": {
                "time": hours(2),
                "temperature_2m": null,
                "cloud_cover": "50",
                "cloud_cover_low": [1, "x"],
                "cloud_cover_high": [null, null],
                "cloud_cover_mid": [5, 6],
            }
        });
        let ds = build_dataset(&root, &catalog(), LengthPolicy::Exclude).unwrap();
        assert_eq!(ds.columns(), vec!["time", "cloud_cover_mid"]);
        assert_eq!(ds.exclusion("temperature_2m"), Some(&ExclusionReason::Null));
        assert_eq!(ds.exclusion("cloud_cover"), Some(&ExclusionReason::NotASequence));
        assert_eq!(
            ds.exclusion("cloud_cover_low"),
            Some(&ExclusionReason::NonNumeric { index: 1 })
        );
        assert_eq!(ds.exclusion("cloud_cover_high"), Some(&ExclusionReason::AllNull));
    }

    #[test]
    fn length_mismatch_excluded_by_default() {
        let root = json!({
            "hourly": {
                "time": hours(24),
                "wind_speed_10m": vec![5.0; 23],
                "temperature_2m": vec![20.0; 24],
            }
        });
        let ds = build_dataset(&root, &catalog(), LengthPolicy::Exclude).unwrap();
        assert!(!ds.contains("wind_speed_10m"));
        assert!(ds.contains("temperature_2m"));
        assert_eq!(
            ds.exclusion("wind_speed_10m"),
            Some(&ExclusionReason::LengthMismatch {
                expected: 24,
                actual: 23
            })
        );
    }

    #[test]
    fn length_mismatch_aligned_on_request() {
        let root = json!({
            "hourly": {
                "time": hours(3),
                "wind_speed_10m": [1.0, 2.0],
                "wind_gusts_10m": [1.0, 2.0, 3.0, 4.0],
            }
        });
        let ds = build_dataset(&root, &catalog(), LengthPolicy::Align).unwrap();
        assert_eq!(
            ds.series("wind_speed_10m").unwrap().values,
            vec![Some(1.0), Some(2.0), None]
        );
        assert_eq!(
            ds.series("wind_gusts_10m").unwrap().values,
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn only_catalog_variables_are_considered() {
        let custom = PlotCatalog::new(vec![PlotSpec::new(
            "snowfall",
            "snow.png",
            "Snow",
            "Snowfall (cm)",
            PlotKind::Bar,
            QuantityKind::NonNegative,
        )]);
        let root = json!({
            "hourly": {"time": hours(1), "snowfall": [0.5], "temperature_2m": [1.0]}
        });
        let ds = build_dataset(&root, &custom, LengthPolicy::Exclude).unwrap();
        assert_eq!(ds.columns(), vec!["time", "snowfall"]);
    }

    #[test]
    fn timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-05-01T13:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T13:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 13:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T15:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T13:00:00Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("May 1st"), None);
    }
}
