//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tapmath/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TapConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Problem the camera flow loads, by id.
    pub default_problem: Option<String>,
}

/// Delays behind the staged reveals: the mocked camera scan and the
/// two-phase knowledge-graph animation on the summary screen.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimingConfig {
    pub scan_delay_ms: Option<u64>,
    pub graph_nodes_delay_ms: Option<u64>,
    pub graph_links_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SCAN_DELAY_MS: u64 = 1500;
pub const DEFAULT_GRAPH_NODES_DELAY_MS: u64 = 300;
pub const DEFAULT_GRAPH_LINKS_DELAY_MS: u64 = 800;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub default_problem: Option<String>,
    pub scan_delay_ms: u64,
    pub graph_nodes_delay_ms: u64,
    pub graph_links_delay_ms: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tapmath/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tapmath").join("config.toml"))
}

/// Load config from `~/.tapmath/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TapConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TapConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TapConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TapConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TapConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# TapMath Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_problem = "prob_001"       # Problem loaded by the camera flow

# [timing]
# scan_delay_ms = 1500               # Mocked capture/scan duration
# graph_nodes_delay_ms = 300         # Summary graph: nodes appear
# graph_links_delay_ms = 800         # Summary graph: links appear
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_instant` comes from the `--instant` flag and zeroes every delay,
/// which also makes scripted/automated runs deterministic.
pub fn resolve(config: &TapConfig, cli_instant: bool) -> ResolvedConfig {
    // Default problem: env → config (None = registry decides)
    let default_problem = std::env::var("TAPMATH_DEFAULT_PROBLEM")
        .ok()
        .or_else(|| config.general.default_problem.clone());

    if cli_instant {
        return ResolvedConfig {
            default_problem,
            scan_delay_ms: 0,
            graph_nodes_delay_ms: 0,
            graph_links_delay_ms: 0,
        };
    }

    ResolvedConfig {
        default_problem,
        scan_delay_ms: config.timing.scan_delay_ms.unwrap_or(DEFAULT_SCAN_DELAY_MS),
        graph_nodes_delay_ms: config
            .timing
            .graph_nodes_delay_ms
            .unwrap_or(DEFAULT_GRAPH_NODES_DELAY_MS),
        graph_links_delay_ms: config
            .timing
            .graph_links_delay_ms
            .unwrap_or(DEFAULT_GRAPH_LINKS_DELAY_MS),
    }
}
