//! Configuration file loading with precedence handling.

use crate::graph_layout::{LayoutKind, LayoutOptions};
use crate::model::{Metric, DEFAULT_TOP_N};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default path of the static report.
pub const DEFAULT_OUTPUT: &str = "network_errors.html";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has a value outside its domain.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name (config key or environment variable).
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/netfail/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path of the HTML report.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Initial metric: "send", "receive" or "combined".
    #[serde(default)]
    pub metric: Option<String>,

    /// Initial minimum edge weight.
    #[serde(default)]
    pub threshold: Option<u64>,

    /// Length of the ranked server list.
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Node placement: "grid", "circle" or "spiral".
    #[serde(default)]
    pub layout: Option<String>,

    /// Grid jitter as a fraction of spacing.
    #[serde(default)]
    pub layout_noise: Option<f64>,

    /// Seed for grid jitter.
    #[serde(default)]
    pub layout_seed: Option<u64>,

    /// Parse only the last N lines of each file.
    #[serde(default)]
    pub max_lines: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Where the HTML report is written.
    pub output: PathBuf,
    /// Initial metric.
    pub metric: Metric,
    /// Initial minimum edge weight.
    pub threshold: u64,
    /// Rows in the ranking tables.
    pub top_n: usize,
    /// Node placement.
    pub layout: LayoutOptions,
    /// Only the last `max_lines` lines of each file are parsed.
    pub max_lines: Option<usize>,
    /// Diagnostic log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            metric: Metric::Combined,
            threshold: 1,
            top_n: DEFAULT_TOP_N,
            layout: LayoutOptions::default(),
            max_lines: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Settings given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--output`.
    pub output: Option<PathBuf>,
    /// `--metric`.
    pub metric: Option<Metric>,
    /// `--threshold`.
    pub threshold: Option<u64>,
    /// `--top`.
    pub top_n: Option<usize>,
    /// `--layout`.
    pub layout: Option<LayoutKind>,
    /// `--max-lines`.
    pub max_lines: Option<usize>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/netfail/netfail.log` on Linux, or the platform
/// equivalent. Falls back to the current directory when there is no state
/// directory (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("netfail").join("netfail.log")
    } else {
        PathBuf::from("netfail.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/netfail/config.toml` on Linux, the platform equivalent
/// elsewhere, or `None` if there is no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("netfail").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `NETFAIL_CONFIG` environment variable
/// 3. Default path `~/.config/netfail/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("NETFAIL_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for an unknown metric or layout name,
/// a zero `top_n` or `max_lines`, or a negative `layout_noise`.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let metric = match config.metric {
        Some(name) => name.parse::<Metric>().map_err(|e| invalid("metric", e))?,
        None => defaults.metric,
    };
    let kind = match config.layout {
        Some(name) => name.parse::<LayoutKind>().map_err(|e| invalid("layout", e))?,
        None => defaults.layout.kind,
    };
    let noise = config.layout_noise.unwrap_or(defaults.layout.noise);
    if !(noise.is_finite() && noise >= 0.0) {
        return Err(invalid("layout_noise", "must be a non-negative number"));
    }
    let top_n = config.top_n.unwrap_or(defaults.top_n);
    if top_n == 0 {
        return Err(invalid("top_n", "must be at least 1"));
    }
    if config.max_lines == Some(0) {
        return Err(invalid("max_lines", "must be at least 1"));
    }

    Ok(ResolvedConfig {
        output: config.output.unwrap_or(defaults.output),
        metric,
        threshold: config.threshold.unwrap_or(defaults.threshold),
        top_n,
        layout: LayoutOptions {
            kind,
            noise,
            seed: config.layout_seed.unwrap_or(defaults.layout.seed),
        },
        max_lines: config.max_lines.or(defaults.max_lines),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `NETFAIL_OUTPUT`: Override the report path
/// - `NETFAIL_LAYOUT`: Override the layout kind
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `NETFAIL_LAYOUT` names no layout.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(output) = std::env::var("NETFAIL_OUTPUT") {
        config.output = PathBuf::from(output);
    }

    if let Ok(layout) = std::env::var("NETFAIL_LAYOUT") {
        config.layout.kind = layout
            .parse::<LayoutKind>()
            .map_err(|e| invalid("NETFAIL_LAYOUT", e))?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only flags that were explicitly set are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric;
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(top_n) = cli.top_n {
        config.top_n = top_n;
    }
    if let Some(kind) = cli.layout {
        config.layout.kind = kind;
    }
    if let Some(max_lines) = cli.max_lines {
        config.max_lines = Some(max_lines);
    }

    config
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
