use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregator::Analyzer;
use crate::percentile::percentile;

/// Latency summary for one service. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub count: u64,
    pub p50: f64,
    pub p99: f64,
    pub min: f64,
    pub max: f64,
}

impl ServiceStats {
    /// Summarize a non-empty latency buffer.
    fn from_latencies(latencies: &[f64]) -> Self {
        Self {
            count: latencies.len() as u64,
            p50: percentile(latencies, 50.0),
            p99: percentile(latencies, 99.0),
            min: latencies.iter().copied().fold(f64::INFINITY, f64::min),
            max: latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Point-in-time statistics view handed to the reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_logs: u64,
    pub error_count: u64,
    /// Percentage of records at level `ERROR`, rounded to 2 decimals.
    pub error_rate: f64,
    /// Keyed by service name; iteration order is alphabetical.
    pub services: BTreeMap<String, ServiceStats>,
}

impl StatsSnapshot {
    /// Highest p99 across all services, or 0 when there are none.
    pub fn overall_p99(&self) -> f64 {
        self.services.values().map(|s| s.p99).fold(0.0, f64::max)
    }
}

impl Analyzer {
    /// Build a snapshot of the current state.
    ///
    /// Re-sorts every service's full history, so cost grows with
    /// O(Σ n log n); call it once per batch rather than per record.
    pub fn get_stats(&self) -> StatsSnapshot {
        let services = self
            .latencies_by_service
            .iter()
            .map(|(name, latencies)| {
                debug_assert!(!latencies.is_empty(), "buffer for {name} created without a sample");
                (name.clone(), ServiceStats::from_latencies(latencies))
            })
            .collect();

        StatsSnapshot {
            total_logs: self.total_logs,
            error_count: self.error_count,
            error_rate: error_rate(self.error_count, self.total_logs),
            services,
        }
    }
}

fn error_rate(error_count: u64, total_logs: u64) -> f64 {
    if total_logs == 0 {
        return 0.0;
    }
    round2(error_count as f64 / total_logs as f64 * 100.0)
}

/// Two decimals, exact ties to even (0.125 → 0.12, 0.625 → 0.62).
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
