//! procscript configuration
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. User-level (~/.config/procscript/config.ron)
//! 3. Default values
//! ```
//!
//! # Usage
//!
//! ```rust
//! use procscript::util::config::RuntimeConfig;
//!
//! let config: RuntimeConfig = ron::from_str("(max_ticks: 10)").unwrap();
//! assert_eq!(config.max_ticks, 10);
//! ```

use crate::util::logger::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration for the interpreter and CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Minimum level for diagnostics
    #[serde(default)]
    pub log_level: LogLevel,
    /// Upper bound on scheduler ticks after the main body has run
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    /// Seed for the interpreter's random source; `None` seeds from the OS
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Mirror `print` output into the log at INFO level
    #[serde(default)]
    pub echo_prints: bool,
    /// Deepest nesting of procedure and function frames
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,
}

fn default_max_ticks() -> u64 {
    1000
}

fn default_max_call_depth() -> usize {
    crate::runtime::interpreter::MAX_CALL_DEPTH
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            max_ticks: default_max_ticks(),
            rng_seed: None,
            echo_prints: false,
            max_call_depth: default_max_call_depth(),
        }
    }
}

/// Get the config directory path
pub fn get_config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("procscript"));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("procscript"))
}

/// Get the config file path
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.ron"))
}

/// Load user-level configuration, falling back to defaults when no file exists
pub fn load_user_config() -> Result<RuntimeConfig, ConfigError> {
    match get_config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(RuntimeConfig::default()),
    }
}

/// Load configuration from an explicit path
pub fn load_config_from(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::IoError)?;
    ron::from_str(&content).map_err(ConfigError::ParseError)
}

/// Save configuration to an explicit path
pub fn save_config_to(
    config: &RuntimeConfig,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(ConfigError::IoError)?;
        }
    }
    let content = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .map_err(ConfigError::SerializeError)?;
    fs::write(path, content).map_err(ConfigError::IoError)
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Config serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
