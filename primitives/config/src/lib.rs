#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! walletd-rpc Configuration
//!
//! This crate loads and saves the settings shared by walletd-rpc binaries:
//! - where the walletd daemon listens and how to authenticate against it
//! - how verbose logging should be
//!
//! Configuration is stored in TOML format. Every key is optional; missing
//! keys fall back to the walletd defaults (`http://127.0.0.1:8070/json_rpc`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use transport::{Endpoint, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PREFIX, DEFAULT_SCHEME};

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Daemon connection settings
    pub endpoint: EndpointConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Daemon connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// URL scheme (`http` or `https`)
    pub scheme: String,
    /// Daemon host
    pub host: String,
    /// Daemon RPC port
    pub port: u16,
    /// RPC username, embedded in the URL when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// RPC password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Path prefix; an empty string disables it
    pub prefix: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Converts these settings into a transport [`Endpoint`].
    pub fn to_endpoint(&self) -> Endpoint {
        let mut endpoint = Endpoint::new(&self.host, self.port)
            .with_scheme(&self.scheme)
            .with_prefix(&self.prefix);
        if let Some(user) = &self.username {
            endpoint =
                endpoint.with_credentials(user, self.password.clone().unwrap_or_default());
        }
        endpoint
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), json: false } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the file at `path` if it exists, otherwise return the defaults
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/walletd-rpc/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("walletd-rpc");
        Ok(config_dir.join("config.toml"))
    }

    /// The daemon endpoint described by this configuration
    pub fn endpoint(&self) -> Endpoint { self.endpoint.to_endpoint() }
}
