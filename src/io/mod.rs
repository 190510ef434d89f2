//! Input/output helpers.
//!
//! - JSON document loading (`input`)
//! - dataset validation + timestamp parsing (`dataset`)
//! - batch report export (`export`)

pub mod dataset;
pub mod export;
pub mod input;

pub use dataset::*;
pub use export::*;
pub use input::*;
