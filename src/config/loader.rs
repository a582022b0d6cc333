//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, etc).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional — anything unspecified falls back to the
/// hardcoded defaults. Corresponds to `~/.config/vgrid/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Simulated dataset size.
    #[serde(default)]
    pub rows: Option<usize>,

    /// Fetch page size in rows.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// RNG seed for dataset generation.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Simulated backend latency in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Overscan rows rendered beyond the viewport.
    #[serde(default)]
    pub overscan: Option<usize>,

    /// Fetch-more threshold in row-height units (terminal lines).
    #[serde(default)]
    pub fetch_threshold: Option<usize>,

    /// Use measured row heights instead of the fixed estimate.
    #[serde(default)]
    pub measured: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Path of the persisted column-order state file.
    #[serde(default)]
    pub column_order_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub rows: usize,
    pub page_size: usize,
    pub seed: u64,
    pub latency_ms: u64,
    pub overscan: usize,
    pub fetch_threshold: usize,
    pub measured: bool,
    pub log_file_path: PathBuf,
    pub column_order_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            rows: 200,
            page_size: 100,
            seed: 42,
            latency_ms: 150,
            overscan: 5,
            fetch_threshold: 10,
            measured: false,
            log_file_path: default_log_path(),
            column_order_path: crate::config::default_column_order_path(),
        }
    }
}

/// Resolve the default log file path.
///
/// `~/.local/state/vgrid/vgrid.log` on Unix-like systems, or the
/// platform-appropriate state directory elsewhere. Falls back to the
/// current directory if no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("vgrid").join("vgrid.log")
    } else {
        PathBuf::from("vgrid.log")
    }
}

/// Load a configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error — use
/// defaults). Returns `Err` if the file exists but cannot be read or
/// parsed.
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

/// Resolve the default config file path (`~/.config/vgrid/config.toml`).
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VGRID_CONFIG` environment variable
/// 3. Default path `~/.config/vgrid/config.toml`
///
/// Missing config files are NOT errors — defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("VGRID_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a config file into defaults to create a resolved config.
///
/// For each field, `Some(value)` from the file wins; `None` keeps the
/// default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        rows: config.rows.unwrap_or(defaults.rows),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        seed: config.seed.unwrap_or(defaults.seed),
        latency_ms: config.latency_ms.unwrap_or(defaults.latency_ms),
        overscan: config.overscan.unwrap_or(defaults.overscan),
        fetch_threshold: config.fetch_threshold.unwrap_or(defaults.fetch_threshold),
        measured: config.measured.unwrap_or(defaults.measured),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        column_order_path: config
            .column_order_path
            .unwrap_or(defaults.column_order_path),
    }
}

/// Apply environment variable overrides to a resolved config.
///
/// Checks `VGRID_SEED` (dataset seed) and `VGRID_LATENCY_MS`; malformed
/// values are ignored rather than fatal.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(seed) = std::env::var("VGRID_SEED")
        .ok()
        .and_then(|raw| raw.parse().ok())
    {
        config.seed = seed;
    }
    if let Some(latency) = std::env::var("VGRID_LATENCY_MS")
        .ok()
        .and_then(|raw| raw.parse().ok())
    {
        config.latency_ms = latency;
    }
    config
}

/// CLI argument overrides for [`apply_cli_overrides`].
///
/// Only values the user explicitly passed are `Some`.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub page_size: Option<usize>,
    pub seed: Option<u64>,
    pub latency_ms: Option<u64>,
    pub measured: Option<bool>,
}

/// Apply CLI argument overrides to a resolved config.
///
/// CLI args have the highest precedence:
/// Defaults → Config File → Env Vars → CLI Args (highest).
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(latency_ms) = cli.latency_ms {
        config.latency_ms = latency_ms;
    }
    if let Some(measured) = cli.measured {
        config.measured = measured;
    }
    config
}
