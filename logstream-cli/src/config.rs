use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Report path used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "report.html";

/// Error rates (percent) below this render green.
pub const ERROR_RATE_OK: f64 = 1.0;

/// Error rates (percent) below this, and at or above `ERROR_RATE_OK`, render orange.
pub const ERROR_RATE_WARN: f64 = 5.0;

/// p99 latencies (ms) above this are flagged as medium.
pub const P99_MEDIUM_MS: f64 = 500.0;

/// p99 latencies (ms) above this are flagged as high.
pub const P99_HIGH_MS: f64 = 2000.0;

/// Everything one analysis run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Retain only the last N records; `None` analyzes everything.
    pub window_size: Option<NonZeroUsize>,
    pub verbose: bool,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            window_size: None,
            verbose: false,
        }
    }
}
