//! Axis geometry: y-bound policy, tick placement, bar width.
//!
//! Everything here is pure so the chart rules can be tested without drawing.
//! The x-axis is expressed in seconds since the Unix epoch (naive timestamps
//! are treated as UTC).

use chrono::{DateTime, NaiveDateTime};

use crate::domain::{PlotSpec, QuantityKind};

/// Bars cover this share of the typical gap between samples.
pub const BAR_WIDTH_FRACTION: f64 = 0.8;
/// Gap assumed when the data has fewer than two distinct timestamps.
pub const DEFAULT_GAP_SECONDS: f64 = 3600.0;
/// Upper limit on the number of time labels along the x-axis.
pub const MAX_TIME_LABELS: usize = 12;
/// Rough number of y ticks for non-angular axes.
pub const TARGET_Y_TICKS: usize = 8;

const HOUR: f64 = 3600.0;
const TIME_STEPS_HOURS: &[f64] = &[1.0, 2.0, 3.0, 6.0, 12.0, 24.0, 48.0, 72.0, 168.0];

/// Resolved y-axis: bounds and tick positions.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    pub lower: f64,
    pub upper: f64,
    pub ticks: Vec<f64>,
}

pub fn time_to_x(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp() as f64
}

pub fn format_time_label(x: f64) -> String {
    DateTime::from_timestamp(x.round() as i64, 0)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

pub fn format_value_label(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Median of the strictly positive gaps between consecutive samples.
pub fn median_gap(xs: &[f64]) -> Option<f64> {
    let mut gaps: Vec<f64> = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|g| g.is_finite() && *g > 0.0)
        .collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_by(|a, b| a.total_cmp(b));
    let mid = gaps.len() / 2;
    Some(if gaps.len() % 2 == 0 {
        (gaps[mid - 1] + gaps[mid]) / 2.0
    } else {
        gaps[mid]
    })
}

/// Width of each bar in x-axis units.
pub fn bar_width(xs: &[f64]) -> f64 {
    BAR_WIDTH_FRACTION * median_gap(xs).unwrap_or(DEFAULT_GAP_SECONDS)
}

/// X range with half a sample gap of margin on each side, so end bars fit.
pub fn x_range(xs: &[f64]) -> (f64, f64) {
    let half = median_gap(xs).unwrap_or(DEFAULT_GAP_SECONDS) / 2.0;
    match (xs.first(), xs.last()) {
        (Some(&first), Some(&last)) => (first - half, last + half),
        _ => (0.0, 2.0 * half),
    }
}

/// Whole-hour tick positions between `start` and `end`, at most `max_labels` of them.
pub fn time_ticks(start: f64, end: f64, max_labels: usize) -> Vec<f64> {
    if !(start.is_finite() && end.is_finite()) || end < start {
        return Vec::new();
    }
    let max_labels = max_labels.max(2);
    let span = end - start;

    let mut step = TIME_STEPS_HOURS
        .iter()
        .map(|h| h * HOUR)
        .find(|s| (span / s).floor() as usize + 1 <= max_labels)
        .unwrap_or(TIME_STEPS_HOURS[TIME_STEPS_HOURS.len() - 1] * HOUR);
    while (span / step).floor() as usize + 1 > max_labels {
        step *= 2.0;
    }

    let first = (start / step).ceil() * step;
    let mut ticks = Vec::new();
    let mut t = first;
    while t <= end {
        ticks.push(t);
        t += step;
    }
    ticks
}

/// "Nice" tick positions (1, 2, 2.5 or 5 × 10ⁿ apart) covering `[lower, upper]`.
pub fn nice_ticks(lower: f64, upper: f64, target: usize) -> Vec<f64> {
    let span = upper - lower;
    if !(span.is_finite() && span > 0.0) {
        return vec![lower];
    }
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lower / step).ceil();
    let last = (upper / step + 1e-9).floor();
    let mut ticks = Vec::new();
    let mut i = first;
    while i <= last {
        let v = i * step;
        ticks.push(if v == 0.0 { 0.0 } else { v });
        i += 1.0;
    }
    ticks
}

/// Decide the y-axis for one chart.
///
/// Priority: angular quantities always get `[0, 360]` with 45° ticks; then
/// explicit bounds from the `PlotSpec`; then the non-negative floor; then
/// auto-scaling from the data.
pub fn resolve_y_axis(spec: &PlotSpec, data_range: Option<(f64, f64)>) -> YAxis {
    if spec.quantity == QuantityKind::Angular {
        return YAxis {
            lower: 0.0,
            upper: 360.0,
            ticks: (0..=8).map(|i| f64::from(i) * 45.0).collect(),
        };
    }

    let (auto_lower, auto_upper) = match data_range {
        Some((lo, hi)) => pad_range(lo, hi, 0.05),
        None => (0.0, 1.0),
    };

    let mut lower = spec.bounds.lower.unwrap_or(auto_lower);
    let mut upper = spec.bounds.upper.unwrap_or(auto_upper);

    if spec.quantity == QuantityKind::NonNegative {
        lower = spec.bounds.lower.map_or(0.0, |l| l.max(0.0));
    }

    if !(upper > lower) {
        upper = lower + 1.0;
    }
    if !lower.is_finite() || !upper.is_finite() {
        lower = 0.0;
        upper = 1.0;
    }

    YAxis {
        lower,
        upper,
        ticks: nice_ticks(lower, upper, TARGET_Y_TICKS),
    }
}

fn pad_range(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < 1e-12 {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * frac, hi + span * frac)
}

/// Non-null samples as `(x, y)` points, clamped into the visible y range.
pub fn points(xs: &[f64], values: &[Option<f64>], axis: &YAxis) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(values)
        .filter_map(|(&x, v)| v.map(|y| (x, y.clamp(axis.lower, axis.upper))))
        .collect()
}

/// Number of non-null values that `points` / `segments` pull onto the axis edge.
pub fn clamped_count(values: &[Option<f64>], axis: &YAxis) -> usize {
    values
        .iter()
        .flatten()
        .filter(|&&y| y < axis.lower || y > axis.upper)
        .count()
}

/// Runs of consecutive non-null samples; a null breaks the line.
pub fn segments(xs: &[f64], values: &[Option<f64>], axis: &YAxis) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (&x, v) in xs.iter().zip(values) {
        match v {
            Some(y) => current.push((x, y.clamp(axis.lower, axis.upper))),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AxisBounds, PlotKind};
    use chrono::NaiveDate;

    fn spec(quantity: QuantityKind, bounds: AxisBounds) -> PlotSpec {
        PlotSpec::new("v", "v.png", "V", "V", PlotKind::Line, quantity).with_bounds(bounds)
    }

    fn hourly(n: usize) -> Vec<f64> {
        (0..n).map(|i| 1_714_521_600.0 + i as f64 * HOUR).collect()
    }

    #[test]
    fn angular_axis_ignores_explicit_bounds() {
        let axis = resolve_y_axis(
            &spec(QuantityKind::Angular, AxisBounds::new(-50.0, 100.0)),
            Some((10.0, 20.0)),
        );
        assert_eq!(axis.lower, 0.0);
        assert_eq!(axis.upper, 360.0);
        assert_eq!(
            axis.ticks,
            vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0, 360.0]
        );
    }

    #[test]
    fn explicit_bounds_win_for_unconstrained() {
        let axis = resolve_y_axis(
            &spec(QuantityKind::Unconstrained, AxisBounds::new(0.0, 105.0)),
            Some((10.0, 20.0)),
        );
        assert_eq!((axis.lower, axis.upper), (0.0, 105.0));

        let half = AxisBounds {
            lower: None,
            upper: Some(50.0),
        };
        let axis = resolve_y_axis(&spec(QuantityKind::Unconstrained, half), Some((10.0, 20.0)));
        assert_eq!(axis.lower, 9.5);
        assert_eq!(axis.upper, 50.0);
    }

    #[test]
    fn non_negative_never_below_zero() {
        let auto = resolve_y_axis(
            &spec(QuantityKind::NonNegative, AxisBounds::default()),
            Some((2.0, 12.0)),
        );
        assert_eq!(auto.lower, 0.0);
        assert!((auto.upper - 12.5).abs() < 1e-9);

        let negative_explicit = resolve_y_axis(
            &spec(
                QuantityKind::NonNegative,
                AxisBounds {
                    lower: Some(-5.0),
                    upper: None,
                },
            ),
            Some((0.0, 3.0)),
        );
        assert_eq!(negative_explicit.lower, 0.0);

        let all_zero = resolve_y_axis(
            &spec(QuantityKind::NonNegative, AxisBounds::default()),
            Some((0.0, 0.0)),
        );
        assert_eq!((all_zero.lower, all_zero.upper), (0.0, 1.0));
        assert!(all_zero.ticks.iter().all(|t| *t >= 0.0));
    }

    #[test]
    fn flat_series_gets_padding() {
        let axis = resolve_y_axis(
            &spec(QuantityKind::Unconstrained, AxisBounds::default()),
            Some((7.0, 7.0)),
        );
        assert_eq!((axis.lower, axis.upper), (6.0, 8.0));
    }

    #[test]
    fn nice_ticks_are_round() {
        assert_eq!(
            nice_ticks(0.0, 105.0, 8),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
        );
        assert_eq!(nice_ticks(-1.0, 1.0, 8), vec![-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(nice_ticks(3.0, 3.0, 8), vec![3.0]);
    }

    #[test]
    fn bar_width_is_eighty_percent_of_median_gap() {
        let xs = hourly(24);
        assert!((bar_width(&xs) - 0.8 * HOUR).abs() < 1e-9);

        // One irregular gap does not move the median.
        let mut irregular = hourly(5);
        irregular[4] += 5.0 * HOUR;
        assert!((bar_width(&irregular) - 0.8 * HOUR).abs() < 1e-9);

        // Degenerate inputs still give a positive width.
        assert!(bar_width(&[]) > 0.0);
        assert!(bar_width(&[100.0, 100.0]) > 0.0);
    }

    #[test]
    fn median_gap_even_count() {
        assert_eq!(median_gap(&[0.0, 1.0, 4.0]), Some(2.0));
        assert_eq!(median_gap(&[0.0]), None);
    }

    #[test]
    fn time_ticks_respect_label_limit() {
        let xs = hourly(72);
        let ticks = time_ticks(xs[0], xs[71], MAX_TIME_LABELS);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= MAX_TIME_LABELS);
        assert!(ticks.iter().all(|t| t % HOUR == 0.0));

        let few = time_ticks(xs[0], xs[2], MAX_TIME_LABELS);
        assert_eq!(few, vec![xs[0], xs[1], xs[2]]);
    }

    #[test]
    fn time_label_format() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        assert_eq!(format_time_label(time_to_x(ts)), "2024-05-01 06:00");
    }

    #[test]
    fn value_labels_trim_zeros() {
        assert_eq!(format_value_label(45.0), "45");
        assert_eq!(format_value_label(0.25), "0.25");
        assert_eq!(format_value_label(2.5), "2.5");
    }

    #[test]
    fn segments_break_on_nulls() {
        let axis = YAxis {
            lower: 0.0,
            upper: 10.0,
            ticks: vec![],
        };
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let values = [Some(1.0), Some(20.0), None, None, Some(3.0)];
        let segs = segments(&xs, &values, &axis);
        assert_eq!(segs, vec![vec![(0.0, 1.0), (1.0, 10.0)], vec![(4.0, 3.0)]]);
        assert_eq!(points(&xs, &values, &axis).len(), 3);
    }

    #[test]
    fn counts_values_outside_the_axis() {
        let axis = YAxis {
            lower: 0.0,
            upper: 105.0,
            ticks: vec![],
        };
        let values = [Some(120.0), None, Some(50.0), Some(-0.1), Some(105.0)];
        assert_eq!(clamped_count(&values, &axis), 2);
        assert_eq!(clamped_count(&[Some(0.0), None], &axis), 0);
    }
}
