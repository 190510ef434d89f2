//! Reporting: what a batch produced, skipped and failed.

use std::path::PathBuf;

use serde::Serialize;

pub mod format;

pub use format::*;

/// A chart that was not attempted or produced nothing, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedChart {
    pub variable: String,
    pub reason: String,
}

/// A chart whose rendering failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedChart {
    pub variable: String,
    pub error: String,
}

/// Outcome of one pass over the catalog, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub generated: Vec<PathBuf>,
    pub skipped: Vec<SkippedChart>,
    pub failed: Vec<FailedChart>,
}

impl BatchReport {
    /// True when not a single chart was produced.
    pub fn is_empty_batch(&self) -> bool {
        self.generated.is_empty()
    }

    pub fn record_generated(&mut self, path: PathBuf) {
        self.generated.push(path);
    }

    pub fn record_skipped(&mut self, variable: &str, reason: impl ToString) {
        self.skipped.push(SkippedChart {
            variable: variable.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn record_failed(&mut self, variable: &str, error: impl ToString) {
        self.failed.push(FailedChart {
            variable: variable.to_string(),
            error: error.to_string(),
        });
    }
}
