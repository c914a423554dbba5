//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/stay-booking/config.toml`).
//! Every section and key is optional; missing values take the defaults below.
//!
//! ```toml
//! [api]
//! base_url = "https://rentals.example.com/api"
//!
//! [booking]
//! redirect_delay_ms = 2000
//! redirect_path = "/my-bookings"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::errors::ConfigError;
use crate::shared::validations::validate_not_blank;

const APP_DIR: &str = "stay-booking";

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Default location of the persisted sign-in session.
pub fn default_session_path() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("session.json")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub api: ApiConfig,
    #[validate(nested)]
    pub booking: BookingConfig,
    pub session: SessionConfig,
    #[validate(nested)]
    pub display: DisplayConfig,
    #[validate(nested)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read, parse and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Like [`AppConfig::load`], but falls back to defaults and hands back
    /// the load error for the caller to report.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Apply a command-line log level on top of whatever was loaded.
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.logging.level = level;
        }
        self
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn session_path(&self) -> PathBuf {
        self.session
            .path
            .clone()
            .unwrap_or_else(default_session_path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    /// Marketplace REST base URL, without trailing slash.
    #[validate(url)]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BookingConfig {
    /// How long the success banner stays before redirecting.
    #[validate(range(max = 60_000))]
    pub redirect_delay_ms: u64,
    #[validate(custom(function = "validate_not_blank"))]
    pub redirect_path: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 2000,
            redirect_path: "/my-bookings".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DisplayConfig {
    #[validate(custom(function = "validate_not_blank"))]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    #[validate(custom(function = "validate_not_blank"))]
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
