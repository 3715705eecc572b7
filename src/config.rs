//! Configuration system
//!
//! Handles loading configuration from TOML files with environment variable
//! overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Bucket count of the execution index (fixed; no rehashing)
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("flexshop").to_string_lossy().to_string())
        .unwrap_or_else(|| "./flexshop_data".to_string())
}

fn default_bucket_count() -> usize {
    crate::index::DEFAULT_BUCKET_COUNT
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bucket_count: default_bucket_count(),
        }
    }
}

impl StorageConfig {
    pub fn jobs_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("jobs.bin")
    }

    pub fn machines_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("machines.bin")
    }

    pub fn operations_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("operations.bin")
    }

    pub fn executions_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("executions.bin")
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("FLEXSHOP_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Ok(level) = std::env::var("FLEXSHOP_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}
