//! # gtin CLI
//!
//! Parses GTIN barcodes from the command line and prints their fields.
//!
//! ## Usage
//! ```bash
//! gtin 96385074 208000021999
//! gtin --file scans.txt --output json
//! cat scans.txt | gtin --formats UPC12,EAN8
//! ```

pub mod config;
pub mod input;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};

/// Inspect GTIN barcodes (EAN-8, UPC-12).
#[derive(Parser, Debug)]
#[command(name = "gtin", version, about)]
pub struct Cli {
    /// Barcodes to parse. Read from stdin when neither these nor --file are given.
    pub barcodes: Vec<String>,

    /// File with one barcode per line (`#` starts a comment).
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Config file (defaults to ./gtin.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma separated format names, in resolution order.
    #[arg(long, value_delimiter = ',')]
    pub formats: Option<Vec<String>>,
}

impl Cli {
    /// Applies flag overrides on top of the loaded config.
    pub fn apply_to(&self, config: &mut CliConfig) -> Result<(), config::ConfigError> {
        if let Some(output) = self.output {
            config.output.format = output;
        }
        if let Some(formats) = &self.formats {
            config.registry.formats = formats
                .iter()
                .flat_map(|entry| crate::config::split_list(entry))
                .collect();
            config.validate()?;
        }
        Ok(())
    }
}

/// Runs the CLI with a loaded config. Returns `true` when every input
/// parsed.
pub fn run(cli: &Cli, config: &CliConfig) -> anyhow::Result<bool> {
    let registry = config.build_registry()?;
    let inputs = input::collect(&cli.barcodes, cli.file.as_deref())?;
    info!(count = inputs.len(), formats = registry.len(), "Parsing barcodes");

    let outcomes = output::evaluate(&registry, &inputs);

    match config.output.format {
        OutputFormat::Json => println!("{}", output::render_json(&outcomes)?),
        OutputFormat::Text => {
            for outcome in &outcomes {
                match (&outcome.result, &outcome.error) {
                    (Some(info), _) => print!("{}", output::render_text(info)),
                    (None, Some(error)) => {
                        eprintln!("{}", output::render_error(&outcome.input, error))
                    }
                    (None, None) => {}
                }
            }
        }
    }

    Ok(outcomes.iter().all(output::Outcome::is_ok))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "gtin",
            "--output",
            "json",
            "--formats",
            "UPC12,EAN8",
            "96385074",
        ]);
        assert_eq!(cli.barcodes, vec!["96385074"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(
            cli.formats,
            Some(vec!["UPC12".to_string(), "EAN8".to_string()])
        );
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["gtin", "-o", "json", "--formats", "UPC12"]);
        let mut config = CliConfig::default();
        cli.apply_to(&mut config).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.registry.formats, vec!["UPC12"]);
    }

    #[test]
    fn test_format_flag_entries_are_trimmed() {
        let cli = Cli::parse_from(["gtin", "--formats", "UPC12, EAN8"]);
        let mut config = CliConfig::default();
        cli.apply_to(&mut config).unwrap();
        assert_eq!(config.registry.formats, vec!["UPC12", "EAN8"]);
    }

    #[test]
    fn test_unknown_format_flag_rejected() {
        let cli = Cli::parse_from(["gtin", "--formats", "EAN13"]);
        let mut config = CliConfig::default();
        assert!(cli.apply_to(&mut config).is_err());
    }

    #[test]
    fn test_run_reports_failures() {
        let cli = Cli::parse_from(["gtin", "96385074", "96385075"]);
        let ok = run(&cli, &CliConfig::default()).unwrap();
        assert!(!ok);

        let cli = Cli::parse_from(["gtin", "96385074"]);
        assert!(run(&cli, &CliConfig::default()).unwrap());
    }
}
