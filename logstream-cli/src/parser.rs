//! JSON Lines ingestion.
//!
//! Each non-blank line must be a JSON object carrying every key in
//! [`REQUIRED_FIELDS`]. Lines that fail are skipped with a warning; only I/O
//! failures abort a read.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::Path;

use logstream_common::{is_valid_latency, LogRecord, LogStreamError, Result, REQUIRED_FIELDS};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::window::TrailingWindow;

/// Parse one line into a record. `line_number` is only used in errors.
pub fn parse_line(line: &str, line_number: usize) -> Result<LogRecord> {
    let line = line.trim();
    if line.is_empty() {
        return Err(LogStreamError::EmptyLine);
    }

    let value: Value = serde_json::from_str(line).map_err(|e| LogStreamError::CorruptedJson {
        line: line_number,
        reason: e.to_string(),
    })?;
    let Value::Object(fields) = value else {
        return Err(LogStreamError::NotAnObject { line: line_number });
    };

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|name| !fields.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LogStreamError::MissingFields { line: line_number, fields: missing });
    }

    Ok(LogRecord {
        timestamp: opaque_text(&fields, "timestamp"),
        level: optional_string(&fields, "level"),
        service: optional_string(&fields, "service"),
        latency_ms: latency(&fields, line_number),
        msg: opaque_text(&fields, "msg"),
    })
}

/// Read every record from `reader`, skipping blank and malformed lines.
pub fn parse_reader(reader: impl BufRead) -> Result<Vec<LogRecord>> {
    parse_reader_windowed(reader, None)
}

/// Like [`parse_reader`] but keeps only the trailing `window` records.
pub fn parse_reader_windowed(reader: impl BufRead, window: Option<NonZeroUsize>) -> Result<Vec<LogRecord>> {
    let mut retained = TrailingWindow::new(window);
    let mut parsed = 0usize;
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| LogStreamError::Io(format!("line {line_number}: {e}")))?;

        match parse_line(&line, line_number) {
            Ok(record) => {
                parsed += 1;
                retained.push(record);
            }
            Err(LogStreamError::EmptyLine) => {}
            Err(e) => {
                skipped += 1;
                warn!("Skipping line {line_number}: {e}");
            }
        }
    }

    info!("Parsed {parsed} log records ({skipped} skipped)");
    if let Some(size) = window {
        info!("Analyzing last {} records (window size: {size})", retained.len());
    }
    Ok(retained.into_records())
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<LogRecord>> {
    parse_file_windowed(path, None)
}

pub fn parse_file_windowed(path: impl AsRef<Path>, window: Option<NonZeroUsize>) -> Result<Vec<LogRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LogStreamError::InputNotFound(path.display().to_string()),
        _ => LogStreamError::Io(format!("cannot read {}: {e}", path.display())),
    })?;
    info!("Reading logs from: {}", path.display());
    parse_reader_windowed(BufReader::new(file), window)
}

// --- Field conversion ---

fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a Value {
    fields.get(key).unwrap_or(&Value::Null)
}

/// Strings are taken verbatim; any other JSON value keeps its JSON text.
fn opaque_text(fields: &Map<String, Value>, key: &str) -> String {
    match field(fields, key) {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    field(fields, key).as_str().map(str::to_string)
}

/// Only finite, non-negative numbers are accepted. Anything else drops the
/// field (the record is still kept) so no buffer ever sees a non-number.
/// Numbers keep their source text, so one outside `f64` range (`1e400`)
/// lands here instead of failing the whole line.
fn latency(fields: &Map<String, Value>, line_number: usize) -> Option<f64> {
    match field(fields, "latency_ms") {
        Value::Null => None,
        Value::Number(n) => match n.as_f64() {
            Some(v) if is_valid_latency(v) => Some(v),
            _ => {
                warn!("Line {line_number}: invalid latency_ms {n} ignored");
                None
            }
        },
        other => {
            warn!("Line {line_number}: non-numeric latency_ms {other} ignored");
            None
        }
    }
}
