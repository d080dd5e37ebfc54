//! Streaming statistics over log records.
//!
//! Records are fed one at a time into an [`Analyzer`]; [`Analyzer::get_stats`]
//! materializes a [`StatsSnapshot`] with the global error rate and per-service
//! latency percentiles computed exactly over every retained sample.

mod aggregator;
pub mod percentile;
pub mod snapshot;

pub use aggregator::Analyzer;
pub use percentile::percentile;
pub use snapshot::{ServiceStats, StatsSnapshot};
