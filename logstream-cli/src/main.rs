use clap::Parser;
use logstream_cli::config::{RunConfig, DEFAULT_OUTPUT};
use std::io::IsTerminal;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "logstream",
    about = "Log Stream Analyzer - generate a monitoring dashboard from a JSONL log file"
)]
struct Args {
    /// Path to the input JSONL log file.
    #[arg(long)]
    input: PathBuf,

    /// Path to the output HTML report.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Only analyze the last N log entries (default: analyze all).
    #[arg(long)]
    window_size: Option<NonZeroUsize>,

    /// Show processing progress.
    #[arg(long)]
    verbose: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        RunConfig {
            input: args.input,
            output: args.output,
            window_size: args.window_size,
            verbose: args.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    let config = RunConfig::from(Args::parse());
    init_logging(config.verbose);

    match logstream_cli::run(&config) {
        Ok(_) => info!("Report generated successfully"),
        Err(e) => {
            error!("{e}");
            process::exit(e.exit_code());
        }
    }
}
