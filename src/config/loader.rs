//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::helius::HeliusConfig;
use crate::application::ScanConfig;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub helius: HeliusSection,
    pub scanner: ScannerSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Helius API configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct HeliusSection {
    /// Base URL of the v0 REST API
    pub base_url: String,
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// API key (prefer the HELIUS_API_KEY env var over this)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retry attempts per request
    pub max_retries: u32,
    /// Base delay for retry backoff (milliseconds)
    pub retry_base_delay_ms: u64,
}

impl HeliusSection {
    /// Get API key with environment variable fallback
    /// Checks the config value first, then the HELIUS_API_KEY env var
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("HELIUS_API_KEY").ok().filter(|k| !k.is_empty())
    }

    /// Get RPC URL with environment variable override
    /// Checks HELIUS_RPC_URL env var first, falls back to config value
    pub fn get_rpc_url(&self) -> String {
        std::env::var("HELIUS_RPC_URL").unwrap_or_else(|_| self.rpc_url.clone())
    }
}

/// Scanner configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerSection {
    /// Program whose created assets are scanned
    pub program_address: String,
    /// Maximum number of tokens to analyze per scan
    pub max_tokens: usize,
    /// Number of fallback transactions to inspect
    pub transaction_limit: usize,
    /// Pause between per-token lookups (milliseconds)
    pub pacing_delay_ms: u64,
}

/// Output configuration section (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Where the scan result JSON is written
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    "data/tokens.json".to_string()
}

/// Logging configuration section (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate Helius section
        if self.helius.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if self.helius.rpc_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "rpc_url cannot be empty".to_string(),
            ));
        }

        if self.helius.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "timeout_secs must be > 0, got {}",
                self.helius.timeout_secs
            )));
        }

        if self.helius.max_retries == 0 {
            return Err(ConfigError::ValidationError(format!(
                "max_retries must be > 0, got {}",
                self.helius.max_retries
            )));
        }

        // Validate scanner section
        if self.scanner.program_address.is_empty() {
            return Err(ConfigError::ValidationError(
                "program_address cannot be empty".to_string(),
            ));
        }

        if self.scanner.max_tokens == 0 {
            return Err(ConfigError::ValidationError(format!(
                "max_tokens must be > 0, got {}",
                self.scanner.max_tokens
            )));
        }

        if self.scanner.transaction_limit == 0 {
            return Err(ConfigError::ValidationError(format!(
                "transaction_limit must be > 0, got {}",
                self.scanner.transaction_limit
            )));
        }

        // Validate logging
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log level must be one of {:?}, got '{}'",
                LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}

// Conversion from Config to the Helius client config
impl From<&Config> for HeliusConfig {
    fn from(config: &Config) -> Self {
        HeliusConfig {
            base_url: config.helius.base_url.clone(),
            rpc_url: config.helius.get_rpc_url(),
            api_key: config.helius.get_api_key().unwrap_or_default(),
            timeout: Duration::from_secs(config.helius.timeout_secs),
            max_retries: config.helius.max_retries,
            retry_base_delay_ms: config.helius.retry_base_delay_ms,
        }
    }
}

// Conversion from Config to the scan parameters
impl From<&Config> for ScanConfig {
    fn from(config: &Config) -> Self {
        ScanConfig {
            program_address: config.scanner.program_address.clone(),
            max_tokens: config.scanner.max_tokens,
            transaction_limit: config.scanner.transaction_limit,
            pacing_delay: Duration::from_millis(config.scanner.pacing_delay_ms),
        }
    }
}
