//! Configuration management for salesweb
//!
//! This module handles loading, validation, and management of
//! salesweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Spreadsheet upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Accepted file extensions, compared case-insensitively
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Maximum request body size for uploads, in megabytes
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_size_mb: default_max_size_mb(),
        }
    }
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["xlsx".to_string()]
}

fn default_max_size_mb() -> usize {
    10
}

impl UploadConfig {
    /// Check whether a file name carries one of the accepted extensions
    pub fn accepts(&self, file_name: &str) -> bool {
        let extension = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => return false,
        };
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&extension))
    }

    /// Upload limit in bytes
    pub fn max_size_bytes(&self) -> usize {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Header labels used to locate the data table inside a sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Label of the date column
    #[serde(default = "default_date_label")]
    pub date_label: String,
    /// Label of the time-of-day column
    #[serde(default = "default_time_label")]
    pub time_label: String,
    /// Label of the amount column
    #[serde(default = "default_amount_label")]
    pub amount_label: String,
    /// Date format of the date column (chrono syntax)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            date_label: default_date_label(),
            time_label: default_time_label(),
            amount_label: default_amount_label(),
            date_format: default_date_format(),
        }
    }
}

fn default_date_label() -> String {
    "Ngày".to_string()
}

fn default_time_label() -> String {
    "Giờ".to_string()
}

fn default_amount_label() -> String {
    "Thành tiền (VNĐ)".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

/// Transaction record settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Pump identifiers offered in the record form
    #[serde(default = "default_pumps")]
    pub pumps: Vec<String>,
    /// Start with one sample record in the store
    #[serde(default = "default_true")]
    pub seed_sample: bool,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            pumps: default_pumps(),
            seed_sample: true,
        }
    }
}

fn default_pumps() -> Vec<String> {
    (1..=5).map(|n| n.to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency code shown next to amounts
    #[serde(default = "default_currency")]
    pub code: String,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Maximum number of decimal places shown for fractional values
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_currency() -> String {
    "VND".to_string()
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload settings
    #[serde(default)]
    pub upload: UploadConfig,
    /// Spreadsheet header labels
    #[serde(default)]
    pub sheet: SheetConfig,
    /// Transaction record settings
    #[serde(default)]
    pub records: RecordsConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: PathBuf) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound { path }) => {
                log::warn!("Config file {} not found, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to null, not to an empty mapping
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| {
                log::error!("Invalid config YAML: {}", e);
                ConfigError::InvalidYaml
            })?
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.upload.max_size_mb == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.max_size_mb".to_string(),
                reason: "Upload limit must be greater than 0".to_string(),
            });
        }

        if self.upload.allowed_extensions.is_empty() {
            return Err(ConfigError::MissingField {
                field: "upload.allowed_extensions".to_string(),
            });
        }

        let labels = [
            ("sheet.date_label", &self.sheet.date_label),
            ("sheet.time_label", &self.sheet.time_label),
            ("sheet.amount_label", &self.sheet.amount_label),
        ];
        for (field, label) in &labels {
            if label.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                });
            }
        }
        if self.sheet.date_label == self.sheet.time_label
            || self.sheet.date_label == self.sheet.amount_label
            || self.sheet.time_label == self.sheet.amount_label
        {
            return Err(ConfigError::ValidationError {
                message: "Header labels must be distinct".to_string(),
            });
        }

        if self.records.pumps.is_empty() {
            return Err(ConfigError::MissingField {
                field: "records.pumps".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================
