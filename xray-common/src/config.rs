//! Configuration loading and config file resolution
//!
//! Bootstrap configuration comes from a single TOML file. Every key has a
//! compiled default, so a missing file is never fatal. The file itself is
//! located in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `XRAY_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/xray/config.toml` on Linux)
//! 4. None: compiled defaults only
//!
//! Host and port may be overridden again on the command line after loading.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "XRAY_CONFIG";

/// Development front-end origins allowed by default
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Interface to bind the HTTP listener to
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body, in bytes (multipart uploads included)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Origins allowed by the CORS layer
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// PDF report behavior (optional)
    #[serde(default)]
    pub report: ReportConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// PDF report configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Print the batch's computed transparency score instead of the fixed 96
    #[serde(default)]
    pub use_computed_score: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_cors_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            cors_origins: default_cors_origins(),
            logging: LoggingConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where a resolved config file came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    PlatformDefault(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformDefault(p) => p,
        }
    }

    /// Explicitly named files must load; the platform default may be skipped
    fn is_explicit(&self) -> bool {
        !matches!(self, ConfigSource::PlatformDefault(_))
    }
}

/// Locate the config file following the priority order above
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<ConfigSource> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(ConfigSource::CommandLine(path.to_path_buf()));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(ConfigSource::Environment(PathBuf::from(path)));
        }
    }

    // Priority 3: Platform config directory
    default_config_path()
        .filter(|p| p.exists())
        .map(ConfigSource::PlatformDefault)
}

/// Platform config file location, whether or not it exists
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("xray").join("config.toml"));

    if cfg!(target_os = "linux") {
        // ~/.config/xray/config.toml first, then /etc/xray/config.toml
        let system_config = PathBuf::from("/etc/xray/config.toml");
        match user_config {
            Some(path) if path.exists() => Some(path),
            _ if system_config.exists() => Some(system_config),
            other => other,
        }
    } else {
        user_config
    }
}

/// Load configuration with graceful degradation
///
/// - No file found: compiled defaults
/// - Explicit file (CLI or environment) missing or malformed: error
/// - Platform default file malformed: warning, then compiled defaults
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let Some(source) = resolve_config_path(cli_arg) else {
        info!("No config file found, using compiled defaults");
        return Ok(TomlConfig::default());
    };

    match TomlConfig::from_file(source.path()) {
        Ok(config) => {
            info!("Loaded config from {}", source.path().display());
            Ok(config)
        }
        Err(e) if source.is_explicit() => Err(e),
        Err(e) => {
            warn!("Ignoring config file: {}. Using compiled defaults", e);
            Ok(TomlConfig::default())
        }
    }
}
