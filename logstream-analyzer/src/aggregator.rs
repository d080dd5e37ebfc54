use std::collections::HashMap;

use logstream_common::LogRecord;
use tracing::debug;

/// Accumulates running totals and per-service latency buffers.
///
/// State only grows: nothing is removed or corrected once added. Queries go
/// through [`Analyzer::get_stats`], which never mutates.
#[derive(Debug, Default, Clone)]
pub struct Analyzer {
    pub(crate) total_logs: u64,
    pub(crate) error_count: u64,
    /// service → every latency observed for it, in arrival order (unsorted).
    /// An entry exists only once a sample has been pushed, so no buffer is empty.
    pub(crate) latencies_by_service: HashMap<String, Vec<f64>>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record and, if it carries a usable latency, append it to its
    /// service's buffer.
    ///
    /// Records without a service or with a missing, negative or non-finite
    /// latency still count toward `total_logs` and `error_count`.
    pub fn add_record(&mut self, record: &LogRecord) {
        self.total_logs += 1;
        if record.is_error() {
            self.error_count += 1;
        }

        match record.latency_sample() {
            Some((service, latency)) => {
                self.latencies_by_service
                    .entry(service.to_string())
                    .or_default()
                    .push(latency);
            }
            None => {
                debug!(
                    service = ?record.service,
                    latency_ms = ?record.latency_ms,
                    "record counted without a latency sample"
                );
            }
        }
    }

    pub fn total_logs(&self) -> u64 {
        self.total_logs
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// Number of services with at least one latency sample.
    pub fn service_count(&self) -> usize {
        self.latencies_by_service.len()
    }

    /// Raw samples for `service` in arrival order.
    pub fn latencies(&self, service: &str) -> Option<&[f64]> {
        self.latencies_by_service.get(service).map(Vec::as_slice)
    }
}

impl<'a> Extend<&'a LogRecord> for Analyzer {
    fn extend<I: IntoIterator<Item = &'a LogRecord>>(&mut self, records: I) {
        for record in records {
            self.add_record(record);
        }
    }
}
