//! TOML configuration for the `afw` tool.
//!
//! Every section is optional; a missing file yields [`Config::default`].
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "text"
//!
//! [validation]
//! check_bounds = true
//! strategy_vocabulary = false
//! fail_fast = false
//! max_file_bytes = 10485760
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Log output format.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Log severity threshold.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Run each record's `validate()` range checks.
    #[serde(default = "default_true")]
    pub check_bounds: bool,
    /// Report chunks whose `metadata.strategy` is outside the standard vocabulary.
    #[serde(default)]
    pub strategy_vocabulary: bool,
    /// Stop at the first file with problems.
    #[serde(default)]
    pub fail_fast: bool,
    /// Files larger than this are reported instead of parsed.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_bounds: true,
            strategy_vocabulary: false,
            fail_fast: false,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

/// Load and validate the config at `path`.
///
/// A missing file is not an error: the defaults apply.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config file")?;

    if config.validation.max_file_bytes == 0 {
        anyhow::bail!("validation.max_file_bytes must be > 0");
    }

    Ok(config)
}
