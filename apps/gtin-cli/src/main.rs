//! # gtin CLI Entry Point
//!
//! Loads configuration, installs logging, and dispatches to [`gtin_cli::run`].

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gtin_cli::config::CliConfig;
use gtin_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config)?;

    init_tracing(&config.log_filter);
    config.log_summary();

    if !gtin_cli::run(&cli, &config)? {
        std::process::exit(1);
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=gtin_core=trace` - Show every rejected format per barcode
/// - Otherwise the configured filter (default: `warn`)
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
