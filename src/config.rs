//! Application configuration
//!
//! Loaded from a TOML file. Every section has defaults, so an empty or
//! missing file yields a working development setup.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! url = "sqlite://slotbook.db?mode=rwc"
//!
//! [booking]
//! initial_status = "pending"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::BookingStatus;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "SLOTBOOK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SeaORM connection string. Empty means a file next to the config.
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter, overridden by `RUST_LOG`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Status a freshly committed booking starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialStatus {
    Pending,
    Confirmed,
}

impl From<InitialStatus> for BookingStatus {
    fn from(status: InitialStatus) -> Self {
        match status {
            InitialStatus::Pending => BookingStatus::Pending,
            InitialStatus::Confirmed => BookingStatus::Confirmed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Granularity for places that do not set their own
    pub default_slot_granularity_minutes: u16,
    pub initial_status: InitialStatus,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_slot_granularity_minutes: crate::domain::place::DEFAULT_SLOT_GRANULARITY_MINUTES,
            initial_status: InitialStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Load from `SLOTBOOK_CONFIG` or the per-user default location
    pub fn load_default() -> Result<(Self, PathBuf), ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        let config = Self::load(&path)?;
        Ok((config, path))
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        let granularity = self.booking.default_slot_granularity_minutes;
        if granularity == 0 || granularity > 24 * 60 {
            return Err(ConfigError::Invalid(format!(
                "booking.default_slot_granularity_minutes must be within 1..=1440, got {}",
                granularity
            )));
        }
        Ok(())
    }

    /// Connection URL, defaulting to `slotbook.db` beside the config file
    pub fn connection_url(&self, config_path: &Path) -> String {
        if !self.database.url.is_empty() {
            return self.database.url.clone();
        }
        let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        format!("sqlite://{}?mode=rwc", dir.join("slotbook.db").display())
    }
}

/// `<config dir>/slotbook/config.toml`, or `./config.toml` when the
/// platform has no config directory
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("slotbook").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}
