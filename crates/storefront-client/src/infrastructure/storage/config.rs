//! TOML-based configuration persistence for the storefront client.
//!
//! `AppConfig` lives in one TOML file per user:
//! - Windows:  `%APPDATA%\Storefront\config.toml`
//! - Linux:    `~/.config/storefront/config.toml`
//! - macOS:    `~/Library/Application Support/Storefront/config.toml`
//!
//! ```toml
//! [api]
//! base_url = "https://shop.example.com/api"
//! timeout_secs = 10
//!
//! [session]
//! token_pointer = "/token"
//!
//! [client]
//! log_level = "info"
//! start_path = "/"
//! ```
//!
//! Every field has a default, so a missing file, a missing section, or a
//! config written by an older version all load cleanly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to locate, read, parse, or write the client config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `APPDATA`, `XDG_CONFIG_HOME`, nor `HOME` is set.
    #[error("no platform config directory (APPDATA/XDG_CONFIG_HOME/HOME unset)")]
    NoPlatformConfigDir,

    #[error("cannot access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot encode config as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base address every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Session and token slot settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// JSON pointer to the token inside the login response body.
    #[serde(default = "default_token_pointer")]
    pub token_pointer: String,
    /// Directory holding `session.json`; the platform data dir when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

/// Shell behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Path the router starts at.
    #[serde(default = "default_start_path")]
    pub start_path: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_token_pointer() -> String {
    "/token".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_start_path() -> String {
    "/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_pointer: default_token_pointer(),
            storage_dir: None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            start_path: default_start_path(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the platform config file.
///
/// # Errors
///
/// [`ConfigError::NoPlatformConfigDir`] when the environment names no base
/// directory.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(dir.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file, returning defaults if the
/// file does not exist yet.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the `Storefront` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Storefront"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("storefront"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Storefront")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
