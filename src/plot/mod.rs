//! Chart rendering.
//!
//! - y-bound policy, ticks and bar geometry (`axis`)
//! - plotters drawing of one variable (`chart`)
//! - SVG → PNG conversion (`raster`)

pub mod axis;
pub mod chart;
pub mod raster;

pub use chart::{RenderError, RenderOptions, RenderOutcome, SeriesRenderer, SkipReason};
pub use raster::Rasterizer;
