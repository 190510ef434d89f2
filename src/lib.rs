//! `wx-charts` library crate.
//!
//! The binary (`wxc`) is a thin wrapper around this library so that:
//!
//! - the whole chart batch is testable without spawning processes
//! - the catalog, dataset builder and renderer can be reused on their own

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
