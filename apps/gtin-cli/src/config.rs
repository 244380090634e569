//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main)             │
//! │     --output json --formats UPC12,EAN8                                 │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     GTIN_OUTPUT=json                                                   │
//! │     GTIN_FORMATS=UPC12,EAN8                                            │
//! │     GTIN_LOG=debug                                                     │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or ./gtin.toml when present                       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     text output, EAN8 then UPC12, log filter "warn"                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! log_filter = "warn"
//!
//! [output]
//! format = "json"   # text | json
//!
//! [registry]
//! formats = ["UPC12", "EAN8"]   # resolution order
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use gtin_core::format::standard_format;
use gtin_core::{FormatError, FormatRegistry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "gtin.toml";

// =============================================================================
// Output Format
// =============================================================================

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable blocks on stdout, errors on stderr.
    #[default]
    Text,
    /// One JSON array on stdout.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: "output.format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Standard format names, in resolution order.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        RegistrySettings {
            formats: default_formats(),
        }
    }
}

fn default_formats() -> Vec<String> {
    vec!["EAN8".to_string(), "UPC12".to_string()]
}

fn default_log_filter() -> String {
    "warn".to_string()
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub registry: RegistrySettings,

    /// File the settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// `GTIN_*` variables that overrode file or default values.
    #[serde(skip)]
    pub env_overrides: Vec<&'static str>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: default_log_filter(),
            output: OutputSettings::default(),
            registry: RegistrySettings::default(),
            source: None,
            env_overrides: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `./gtin.toml` if it exists)
    /// 3. Environment variables
    ///
    /// Nothing is logged here since the subscriber depends on the result;
    /// call [`log_summary`](Self::log_summary) once tracing is installed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(&fallback)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `GTIN_*` overrides read through `var`.
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(output) = var("GTIN_OUTPUT") {
            self.output.format = output.parse()?;
            self.env_overrides.push("GTIN_OUTPUT");
        }

        if let Some(formats) = var("GTIN_FORMATS") {
            self.registry.formats = split_list(&formats);
            self.env_overrides.push("GTIN_FORMATS");
        }

        if let Some(filter) = var("GTIN_LOG") {
            self.log_filter = filter;
            self.env_overrides.push("GTIN_LOG");
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - at least one format
    /// - every format is a known standard format
    /// - no format listed twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.formats.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "registry.formats must list at least one format".into(),
            ));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.registry.formats.len());
        for name in &self.registry.formats {
            let format = standard_format(name)
                .ok_or_else(|| ConfigError::UnknownFormat(name.clone()))?;
            if seen.contains(&format.name()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "format {} is listed more than once",
                    format.name()
                )));
            }
            seen.push(format.name());
        }

        Ok(())
    }

    /// Logs where the configuration came from. Call after tracing is up.
    pub fn log_summary(&self) {
        match &self.source {
            Some(path) => info!(path = %path.display(), "Loaded config from file"),
            None => debug!("No config file found, using defaults"),
        }
        for key in &self.env_overrides {
            debug!(variable = *key, "Setting overridden from environment");
        }
        if self.log_filter.trim().is_empty() {
            warn!("Empty log filter, falling back to defaults");
        }
        info!(
            output = ?self.output.format,
            formats = ?self.registry.formats,
            "Configuration loaded"
        );
    }

    /// Builds the registry in the configured order.
    pub fn build_registry(&self) -> Result<FormatRegistry, ConfigError> {
        let mut registry = FormatRegistry::new();
        for name in &self.registry.formats {
            let format = standard_format(name)
                .ok_or_else(|| ConfigError::UnknownFormat(name.clone()))?;
            registry.register(format)?;
        }
        Ok(registry)
    }
}

/// Splits a comma separated list, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown barcode format: {0}")]
    UnknownFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Registry(#[from] FormatError),
}

// =============================================================================
// Unit Tests
// =============================================================================
