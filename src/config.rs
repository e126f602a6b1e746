//! Configuration module for volstore.
//!
//! Configuration is loaded once at startup from a JSON document
//! (`project_properties.json` by default) and never mutated afterwards.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VolstoreError};

/// Volume identity and location.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeConfig {
    /// Catalog the volume belongs to.
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// Schema the volume belongs to.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Name of the volume.
    #[serde(default = "default_volume_name")]
    pub volume_name: String,
    /// Root directory where uploaded files are stored.
    #[serde(default = "default_volume_path")]
    pub path: String,
}

fn default_catalog() -> String {
    "main".to_string()
}

fn default_schema() -> String {
    "default".to_string()
}

fn default_volume_name() -> String {
    "uploads".to_string()
}

fn default_volume_path() -> String {
    "data/volume".to_string()
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            schema: default_schema(),
            volume_name: default_volume_name(),
            path: default_volume_path(),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Display name of the service.
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Short description of the service.
    #[serde(default = "default_app_description")]
    pub description: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u64,
}

fn default_app_name() -> String {
    "Volume File Upload Service".to_string()
}

fn default_app_description() -> String {
    "HTTP service for uploading files to a storage volume".to_string()
}

fn default_max_file_size() -> u64 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            description: default_app_description(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin is allowed.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/volstore.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Volume identity and location.
    #[serde(default)]
    pub volume: VolumeConfig,
    /// Application settings.
    #[serde(default)]
    pub app: AppConfig,
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VolstoreError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a JSON file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn parse(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| VolstoreError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `HOST`: Override the server bind address
    /// - `PORT`: Override the server port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Maximum file size in bytes, derived from the configured megabyte value.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.app.max_file_size_mb * 1024 * 1024
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the volume path is empty
    /// - `max_file_size_mb` is zero
    pub fn validate(&self) -> Result<()> {
        if self.volume.path.is_empty() {
            return Err(VolstoreError::Config(
                "volume.path must not be empty".to_string(),
            ));
        }
        if self.app.max_file_size_mb == 0 {
            return Err(VolstoreError::Config(
                "app.max_file_size_mb must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
