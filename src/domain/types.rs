//! Shared domain types.
//!
//! These types are kept small and mostly `Copy`/`Clone` so the pipeline can pass
//! them around freely:
//!
//! - chart configuration (`PlotKind`, `QuantityKind`, `AxisBounds`, `PlotSpec`)
//! - run configuration (`RunConfig`, `LengthPolicy`, `OutputFormat`)
//! - the validated hourly dataset (`Dataset`, `Series`, `Exclusion`)

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a variable is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    /// Straight segments between samples, with a marker on every sample.
    Line,
    /// One vertical bar per sample, centred on its timestamp.
    Bar,
}

/// Physical nature of a variable, which drives the y-axis policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// A direction in degrees. Always drawn on `[0, 360]` with 45° ticks.
    Angular,
    /// Rates, accumulations and magnitudes. The axis never goes below zero.
    NonNegative,
    /// Anything else (e.g. temperature). Both bounds follow the data.
    Unconstrained,
}

/// Optional explicit y-axis bounds. Either side may be left to auto-scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisBounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl AxisBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

/// Rendering parameters for one weather variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    /// Key under `hourly` in the input JSON.
    pub variable: String,
    /// File name of the produced chart (relative to the output directory).
    pub output_name: String,
    pub title: String,
    pub y_label: String,
    pub kind: PlotKind,
    pub quantity: QuantityKind,
    #[serde(default)]
    pub bounds: AxisBounds,
}

impl PlotSpec {
    pub fn new(
        variable: impl Into<String>,
        output_name: impl Into<String>,
        title: impl Into<String>,
        y_label: impl Into<String>,
        kind: PlotKind,
        quantity: QuantityKind,
    ) -> Self {
        Self {
            variable: variable.into(),
            output_name: output_name.into(),
            title: title.into(),
            y_label: y_label.into(),
            kind,
            quantity,
            bounds: AxisBounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: AxisBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// What to do when a series does not have one value per timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Drop the series from the dataset.
    #[default]
    Exclude,
    /// Keep the series: truncate extra values, pad missing ones with nulls.
    Align,
}

/// Image format of the produced charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raster image at the configured pixel size.
    #[default]
    Png,
    /// The vector document plotters produces, written as-is.
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Place name interpolated into chart titles.
    pub location: String,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub length_policy: LengthPolicy,
    pub fail_on_empty: bool,
    pub report_json: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("weather_data.json"),
            output_dir: PathBuf::from("."),
            location: "Shanghai".to_string(),
            format: OutputFormat::Png,
            width: 1500,
            height: 700,
            length_policy: LengthPolicy::Exclude,
            fail_on_empty: false,
            report_json: None,
        }
    }
}

/// One numeric column of the hourly dataset, aligned with `Dataset::time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Min/max over the non-null values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Why a variable did not make it into the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Key not present under `hourly`.
    Absent,
    /// Key present with a JSON `null`.
    Null,
    /// Key present but not an array.
    NotASequence,
    /// Array contains something other than numbers and nulls.
    NonNumeric { index: usize },
    /// Array length differs from the time series length.
    LengthMismatch { expected: usize, actual: usize },
    /// Every value is null.
    AllNull,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Absent => write!(f, "missing from 'hourly' data"),
            ExclusionReason::Null => write!(f, "value is null"),
            ExclusionReason::NotASequence => write!(f, "value is not a list"),
            ExclusionReason::NonNumeric { index } => {
                write!(f, "non-numeric value at index {index}")
            }
            ExclusionReason::LengthMismatch { expected, actual } => {
                write!(f, "has {actual} values but 'time' has {expected}")
            }
            ExclusionReason::AllNull => write!(f, "all values are null"),
        }
    }
}

/// A variable left out of the dataset, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub variable: String,
    pub reason: ExclusionReason,
}

/// Validated hourly data: ascending timestamps plus equally long series.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub time: Vec<NaiveDateTime>,
    /// Included series, in catalog order.
    pub series: Vec<Series>,
    /// Variables that were considered but left out.
    pub excluded: Vec<Exclusion>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn series(&self, variable: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == variable)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.series(variable).is_some()
    }

    /// Column names including `time`, in dataset order.
    pub fn columns(&self) -> Vec<&str> {
        std::iter::once("time")
            .chain(self.series.iter().map(|s| s.name.as_str()))
            .collect()
    }

    pub fn exclusion(&self, variable: &str) -> Option<&ExclusionReason> {
        self.excluded
            .iter()
            .find(|e| e.variable == variable)
            .map(|e| &e.reason)
    }
}
