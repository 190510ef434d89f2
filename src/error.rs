//! Fatal, run-aborting errors.
//!
//! Per-chart problems are not `AppError`s: they are logged and recorded in the
//! batch report (see `plot::RenderError`). Anything that reaches `main` as an
//! `AppError` terminates the process with its exit code.

/// File I/O failure: input missing, unreadable or not valid JSON; output
/// directory or report file not writable.
pub const EXIT_INPUT: u8 = 2;
/// JSON parsed, but the `hourly` / `hourly.time` structure is unusable.
pub const EXIT_MALFORMED_INPUT: u8 = 3;
/// No chart was produced and the caller asked for that to be fatal.
pub const EXIT_EMPTY_BATCH: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    /// Writing outside the chart batch failed (output directory, JSON report).
    pub fn output(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::new(EXIT_MALFORMED_INPUT, message)
    }

    pub fn empty_batch() -> Self {
        Self::new(EXIT_EMPTY_BATCH, "No chart files were generated successfully.")
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_malformed_input(&self) -> bool {
        self.exit_code == EXIT_MALFORMED_INPUT
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
