//! Series renderer: one variable → one chart file.
//!
//! Drawing goes through plotters' SVG backend. The SVG is either written as-is
//! or rasterized to PNG (see `plot::raster`). All chart geometry (bounds, ticks,
//! bar width) comes from `plot::axis`, so this module only does the drawing.

use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::domain::{Dataset, OutputFormat, PlotKind, PlotSpec, RunConfig, Series};
use crate::plot::axis::{self, MAX_TIME_LABELS};
use crate::plot::raster::Rasterizer;

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);
const FONT: &str = "sans-serif";

/// Where and how charts are written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl RenderOptions {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            format: config.format,
            width: config.width,
            height: config.height,
        }
    }

    /// Output file for `spec`; the extension always matches the output format.
    pub fn output_path(&self, spec: &PlotSpec) -> PathBuf {
        self.output_dir
            .join(Path::new(&spec.output_name).with_extension(self.format.extension()))
    }
}

/// Result of one render call that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(PathBuf),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The variable is not part of the dataset.
    NotInDataset,
    /// The variable is present but has no non-null value.
    NoValues,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotInDataset => write!(f, "data is missing"),
            SkipReason::NoValues => write!(f, "no non-null values"),
        }
    }
}

/// Failure to produce one chart. Never aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to draw chart for '{variable}': {message}")]
    Draw { variable: String, message: String },
    #[error("failed to rasterize chart for '{variable}': {message}")]
    Rasterize { variable: String, message: String },
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Linear `f64` axis whose grid lines and labels sit exactly on precomputed ticks.
///
/// plotters' own `WithKeyPoints` keeps the inner range's formatting option and so
/// cannot be labelled; this axis carries its label function instead.
#[derive(Clone)]
struct TickedAxis {
    range: RangedCoordf64,
    ticks: Vec<f64>,
    label: fn(f64) -> String,
}

impl TickedAxis {
    fn new(lower: f64, upper: f64, ticks: Vec<f64>, label: fn(f64) -> String) -> Self {
        Self {
            range: (lower..upper).into(),
            ticks,
            label,
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.range.map(value, limit)
    }

    // Bold lines only: light grid lines would fall between the ticks.
    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.range.range()
    }
}

impl ValueFormatter<f64> for TickedAxis {
    fn format_ext(&self, value: &f64) -> String {
        (self.label)(*value)
    }
}

/// Renders individual variables of a dataset to chart files.
pub struct SeriesRenderer {
    options: RenderOptions,
    rasterizer: Rasterizer,
}

impl SeriesRenderer {
    /// Loads system fonts when the output is raster; SVG output needs none.
    pub fn new(options: RenderOptions) -> Self {
        let rasterizer = match options.format {
            OutputFormat::Png => Rasterizer::with_system_fonts(),
            OutputFormat::Svg => Rasterizer::without_fonts(),
        };
        Self::with_rasterizer(options, rasterizer)
    }

    pub fn with_rasterizer(options: RenderOptions, rasterizer: Rasterizer) -> Self {
        Self {
            options,
            rasterizer,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `spec.variable` from `dataset`.
    ///
    /// A variable that is absent or entirely null is `Skipped`, not an error.
    /// An existing file at the output path is overwritten.
    pub fn render(&self, dataset: &Dataset, spec: &PlotSpec) -> Result<RenderOutcome, RenderError> {
        let Some(series) = dataset.series(&spec.variable) else {
            return Ok(RenderOutcome::Skipped(SkipReason::NotInDataset));
        };
        if series.non_null_count() == 0 {
            return Ok(RenderOutcome::Skipped(SkipReason::NoValues));
        }

        let path = self.options.output_path(spec);
        info!(variable = %spec.variable, path = %path.display(), "generating chart");

        let xs: Vec<f64> = dataset.time.iter().map(|t| axis::time_to_x(*t)).collect();
        let size = (self.options.width, self.options.height);

        let svg = draw_svg(&xs, series, spec, size).map_err(|message| RenderError::Draw {
            variable: spec.variable.clone(),
            message,
        })?;

        let bytes = match self.options.format {
            OutputFormat::Svg => svg.into_bytes(),
            OutputFormat::Png => self
                .rasterizer
                .svg_to_png(&svg, size.0, size.1)
                .map_err(|message| RenderError::Rasterize {
                    variable: spec.variable.clone(),
                    message,
                })?,
        };

        std::fs::write(&path, &bytes).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(bytes = bytes.len(), "chart written");
        info!(path = %path.display(), "chart saved");
        Ok(RenderOutcome::Rendered(path))
    }
}

fn draw_svg(
    xs: &[f64],
    series: &Series,
    spec: &PlotSpec,
    size: (u32, u32),
) -> Result<String, String> {
    let y_axis = axis::resolve_y_axis(spec, series.value_range());
    let (x0, x1) = axis::x_range(xs);
    let x_ticks = match (xs.first(), xs.last()) {
        (Some(&first), Some(&last)) => axis::time_ticks(first, last, MAX_TIME_LABELS),
        _ => Vec::new(),
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, (FONT, 24).into_font())
            .margin(20)
            // Room for rotated "YYYY-MM-DD HH:MM" labels plus the axis title.
            .x_label_area_size(150)
            .y_label_area_size(70)
            .build_cartesian_2d(
                TickedAxis::new(x0, x1, x_ticks, axis::format_time_label),
                TickedAxis::new(
                    y_axis.lower,
                    y_axis.upper,
                    y_axis.ticks.clone(),
                    axis::format_value_label,
                ),
            )
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc(spec.y_label.as_str())
            .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
            .y_label_style((FONT, 12).into_font())
            .axis_desc_style((FONT, 14).into_font())
            .bold_line_style(BLACK.mix(0.15))
            .draw()
            .map_err(|e| e.to_string())?;

        let values = &series.values;
        let clamped = axis::clamped_count(values, &y_axis);
        if clamped > 0 {
            debug!(
                variable = %spec.variable,
                clamped,
                lower = y_axis.lower,
                upper = y_axis.upper,
                "values outside the y-axis drawn at its edge"
            );
        }
        match spec.kind {
            PlotKind::Line => {
                for (idx, segment) in axis::segments(xs, values, &y_axis).into_iter().enumerate() {
                    let anno = chart
                        .draw_series(LineSeries::new(segment, LINE_COLOR.stroke_width(2)))
                        .map_err(|e| e.to_string())?;
                    if idx == 0 {
                        anno.label(spec.y_label.as_str()).legend(|(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], LINE_COLOR.stroke_width(2))
                        });
                    }
                }

                chart
                    .draw_series(
                        axis::points(xs, values, &y_axis)
                            .into_iter()
                            .map(|p| Circle::new(p, 3, LINE_COLOR.filled())),
                    )
                    .map_err(|e| e.to_string())?;

                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .label_font((FONT, 12).into_font())
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(|e| e.to_string())?;
            }
            PlotKind::Bar => {
                let half = axis::bar_width(xs) / 2.0;
                let base = if y_axis.lower <= 0.0 && y_axis.upper >= 0.0 {
                    0.0
                } else {
                    y_axis.lower
                };

                chart
                    .draw_series(axis::points(xs, values, &y_axis).into_iter().map(|(x, y)| {
                        Rectangle::new([(x - half, base), (x + half, y)], BAR_COLOR.filled())
                    }))
                    .map_err(|e| e.to_string())?;
            }
        }

        root.present().map_err(|e| e.to_string())?;
    }

    Ok(svg)
}
