//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, model location,
//! model version and engine tuning. `MODEL_PATH` and `MODEL_VERSION`
//! environment variables override the file.

use serde::Deserialize;
use setlist_engine::EngineConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `model_path`
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";

/// Environment variable overriding `model_version`
pub const MODEL_VERSION_ENV: &str = "MODEL_VERSION";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 5000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Rule corpus to serve
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Version label reported with every response
    #[serde(default = "default_model_version")]
    pub model_version: String,

    /// Ranking and truncation settings
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_port() -> u16 {
    5000
}

fn default_model_path() -> PathBuf {
    PathBuf::from("/model/rules.json")
}

fn default_model_version() -> String {
    "0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            model_path: default_model_path(),
            model_version: default_model_version(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without consulting the environment
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `MODEL_PATH` / `MODEL_VERSION` if set
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(MODEL_PATH_ENV).ok(),
            std::env::var(MODEL_VERSION_ENV).ok(),
        );
    }

    /// Apply explicit overrides for model path and version
    pub fn apply_overrides(&mut self, model_path: Option<String>, model_version: Option<String>) {
        if let Some(path) = model_path {
            self.model_path = PathBuf::from(path);
        }
        if let Some(version) = model_version {
            self.model_version = version;
        }
    }

    /// Check required fields and cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("model_path".to_string()));
        }
        if self.engine.default_top_n > self.engine.max_top_n {
            return Err(ConfigError::Invalid(format!(
                "engine.default_top_n ({}) exceeds engine.max_top_n ({})",
                self.engine.default_top_n, self.engine.max_top_n
            )));
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
