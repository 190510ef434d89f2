//! The fixed table of charts the program knows how to draw.
//!
//! Order matters only for reporting: charts are rendered and listed in the
//! order entries appear here.

use crate::domain::{AxisBounds, PlotKind, PlotSpec, QuantityKind};

/// Percentages get a little headroom above 100 so the line is not glued to the frame.
const PERCENT_BOUNDS: AxisBounds = AxisBounds {
    lower: Some(0.0),
    upper: Some(105.0),
};

/// Immutable, ordered list of plot specifications.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCatalog {
    entries: Vec<PlotSpec>,
}

impl PlotCatalog {
    pub fn new(entries: Vec<PlotSpec>) -> Self {
        Self { entries }
    }

    /// The standard hourly forecast charts, with `location` in every title.
    pub fn standard(location: &str) -> Self {
        use PlotKind::{Bar, Line};
        use QuantityKind::{Angular, NonNegative, Unconstrained};

        let title = |what: &str| {
            if location.trim().is_empty() {
                format!("Hourly {what} Forecast")
            } else {
                format!("Hourly {what} Forecast ({})", location.trim())
            }
        };

        Self::new(vec![
            PlotSpec::new(
                "temperature_2m",
                "temperature_chart.png",
                title("Temperature"),
                "Temperature (°C)",
                Line,
                Unconstrained,
            ),
            PlotSpec::new(
                "relative_humidity_2m",
                "relative_humidity_chart.png",
                title("Relative Humidity"),
                "Relative Humidity (%)",
                Line,
                NonNegative,
            )
            .with_bounds(PERCENT_BOUNDS),
            PlotSpec::new(
                "cloud_cover",
                "cloud_cover_total_chart.png",
                title("Total Cloud Cover"),
                "Cloud Cover (%)",
                Line,
                NonNegative,
            )
            .with_bounds(PERCENT_BOUNDS),
            PlotSpec::new(
                "cloud_cover_low",
                "cloud_cover_low_chart.png",
                title("Low Cloud Cover"),
                "Cloud Cover (%)",
                Line,
                NonNegative,
            )
            .with_bounds(PERCENT_BOUNDS),
            PlotSpec::new(
                "cloud_cover_mid",
                "cloud_cover_mid_chart.png",
                title("Mid Cloud Cover"),
                "Cloud Cover (%)",
                Line,
                NonNegative,
            )
            .with_bounds(PERCENT_BOUNDS),
            PlotSpec::new(
                "cloud_cover_high",
                "cloud_cover_high_chart.png",
                title("High Cloud Cover"),
                "Cloud Cover (%)",
                Line,
                NonNegative,
            )
            .with_bounds(PERCENT_BOUNDS),
            PlotSpec::new(
                "precipitation",
                "precipitation_chart.png",
                title("Precipitation"),
                "Precipitation (mm)",
                Bar,
                NonNegative,
            ),
            PlotSpec::new(
                "precipitation_probability",
                "precipitation_probability_chart.png",
                title("Precipitation Probability"),
                "Precipitation Probability (%)",
                Bar,
                NonNegative,
            )
            .with_bounds(PERCENT_BOUNDS),
            PlotSpec::new(
                "wind_speed_10m",
                "wind_speed_chart.png",
                title("Wind Speed (10m)"),
                "Wind Speed (km/h)",
                Line,
                NonNegative,
            ),
            PlotSpec::new(
                "wind_gusts_10m",
                "wind_gusts_chart.png",
                title("Wind Gusts (10m)"),
                "Wind Gusts (km/h)",
                Line,
                NonNegative,
            ),
            PlotSpec::new(
                "wind_direction_10m",
                "wind_direction_chart.png",
                title("Wind Direction (10m)"),
                "Wind Direction (°)",
                Line,
                Angular,
            ),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlotSpec> {
        self.entries.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.variable.as_str())
    }

    pub fn get(&self, variable: &str) -> Option<&PlotSpec> {
        self.entries.iter().find(|e| e.variable == variable)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlotCatalog {
    type Item = &'a PlotSpec;
    type IntoIter = std::slice::Iter<'a, PlotSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
