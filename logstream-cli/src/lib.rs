use logstream_analyzer::{Analyzer, StatsSnapshot};
use logstream_common::Result;
use tracing::info;

pub mod config;
pub mod parser;
pub mod reporter;
pub mod window;

use config::RunConfig;

/// Read, analyze and report: the whole pipeline behind the `logstream` binary.
///
/// Returns the snapshot that was rendered so callers can inspect it.
pub fn run(config: &RunConfig) -> Result<StatsSnapshot> {
    let records = parser::parse_file_windowed(&config.input, config.window_size)?;

    info!("Analyzing logs...");
    let mut analyzer = Analyzer::new();
    analyzer.extend(&records);
    let stats = analyzer.get_stats();

    info!(
        total_logs = stats.total_logs,
        error_rate = stats.error_rate,
        services = stats.services.len(),
        "Analysis complete"
    );

    info!("Generating report: {}", config.output.display());
    reporter::write_report(&stats, &config.output)?;
    Ok(stats)
}
