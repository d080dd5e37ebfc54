use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only `level` value the analyzer treats specially.
pub const ERROR_LEVEL: &str = "ERROR";

/// Keys every input line must carry before it is accepted as a record.
pub const REQUIRED_FIELDS: [&str; 5] = ["timestamp", "level", "service", "latency_ms", "msg"];

/// Error types for log stream operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStreamError {
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Empty line")]
    EmptyLine,

    #[error("Corrupted JSON at line {line}: {reason}")]
    CorruptedJson { line: usize, reason: String },

    #[error("Line {line} is not a JSON object")]
    NotAnObject { line: usize },

    #[error("Line {line} missing required fields: {}", .fields.join(", "))]
    MissingFields { line: usize, fields: Vec<String> },

    #[error("Cannot write report to {path}: {reason}")]
    ReportWrite { path: String, reason: String },
}

impl LogStreamError {
    /// Process exit code for this error: 1 when the input is missing, 2 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            LogStreamError::InputNotFound(_) => 1,
            _ => 2,
        }
    }
}

/// Result type for log stream operations
pub type Result<T> = std::result::Result<T, LogStreamError>;

/// One validated log event.
///
/// `timestamp` and `msg` are carried through untouched. `level`, `service` and
/// `latency_ms` are optional because a line may carry the key with a `null`
/// (or otherwise unusable) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub level: Option<String>,
    pub service: Option<String>,
    pub latency_ms: Option<f64>,
    pub msg: String,
}

impl LogRecord {
    pub fn is_error(&self) -> bool {
        self.level.as_deref() == Some(ERROR_LEVEL)
    }

    /// The `(service, latency)` pair this record contributes to latency tracking.
    ///
    /// Returns `None` when the service is absent or empty, or when the latency is
    /// absent, negative or not finite. Such records still count toward totals.
    pub fn latency_sample(&self) -> Option<(&str, f64)> {
        let service = self.service.as_deref().filter(|s| !s.is_empty())?;
        let latency = self.latency_ms.filter(|v| is_valid_latency(*v))?;
        Some((service, latency))
    }
}

/// A latency value is usable when it is a finite, non-negative number of milliseconds.
pub fn is_valid_latency(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
