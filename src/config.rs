//! Configuration utilities

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Record store settings
    pub store: StoreSettings,
    /// Classifier settings
    pub classifier: ClassifierSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Where the scraped records live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the JSON record store
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.json"),
        }
    }
}

/// Sentiment classifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Backend name (only "lexicon" is built in)
    pub backend: String,
    /// Decimal places kept on confidence values
    pub precision: u32,
    /// Classification timeout for async callers, 0 disables it
    pub timeout_ms: u64,
    /// Whether the backend may serve several batches at once
    pub concurrent_batches: bool,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            backend: "lexicon".to_string(),
            precision: crate::defaults::CONFIDENCE_PRECISION,
            timeout_ms: crate::defaults::CLASSIFY_TIMEOUT_MS,
            concurrent_batches: true,
        }
    }
}

impl AppConfig {
    /// Check values serde cannot bound on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = crate::defaults::MAX_CONFIDENCE_PRECISION;
        if self.classifier.precision > max {
            return Err(ConfigError::InvalidValue(format!(
                "classifier.precision = {} (at most {max})",
                self.classifier.precision
            )));
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON format
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Load configuration from file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::FileError(e.to_string()))?;

    let config: AppConfig = match extension(path.as_ref()) {
        "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?,
        "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?,
        ext => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
    };
    config.validate()?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<(), ConfigError> {
    let content = match extension(path.as_ref()) {
        "json" => serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        "toml" => toml::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        ext => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
    };

    std::fs::write(path, content).map_err(|e| ConfigError::FileError(e.to_string()))
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Serialization error
    #[error("Serialize error: {0}")]
    SerializeError(String),
    /// Unsupported format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    /// Value out of range
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
