//! Configuration for the tpt command line.
//!
//! Read from `~/.tpt/config.toml` unless `--config` points elsewhere. A
//! missing file yields the defaults; every field has a serde default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tpt_algo::SolverConfig;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TptConfig {
    /// Solver selection and tolerances
    #[serde(default)]
    pub solver: SolverSection,
    /// Accepted instance sizes
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Report rendering
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSection {
    /// Backend id; unset picks the preferred backend
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            backend: None,
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

impl SolverSection {
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }
}

fn default_max_iterations() -> usize {
    SolverConfig::default().max_iterations
}

fn default_tolerance() -> f64 {
    SolverConfig::default().tolerance
}

/// Supplier and consumer count bounds, inclusive, starting at 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_limit")]
    pub max_suppliers: usize,
    #[serde(default = "default_limit")]
    pub max_consumers: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_suppliers: default_limit(),
            max_consumers: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    10
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Decimal places shown in reports
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            format: default_format(),
        }
    }
}

fn default_precision() -> u32 {
    2
}

fn default_format() -> OutputFormat {
    OutputFormat::Plain
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Default config location, `~/.tpt/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tpt").join("config.toml"))
}

/// Load configuration from `path`, or the default location when `None`.
///
/// An explicitly named file must exist; the default one may be absent.
pub fn load_config(path: Option<&Path>) -> Result<TptConfig> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(TptConfig::default()),
        },
    };

    if !path.exists() {
        if required {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        return Ok(TptConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: TptConfig =
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}
