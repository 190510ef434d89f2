//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - chart configuration (`PlotSpec`, `PlotKind`, `QuantityKind`, `AxisBounds`)
//! - the fixed chart table (`PlotCatalog`)
//! - the validated input (`Dataset`, `Series`)

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
