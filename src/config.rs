//! Configuration management for the `WeatherDesk` service
//!
//! Handles loading configuration from an optional TOML file and flat
//! environment variables (`API_KEY`, `BASE_URL`, `BG_COLOR`, ...), and
//! validates the result.

use crate::WeatherDeskError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure for the `WeatherDesk` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDeskConfig {
    /// Weather API key
    pub api_key: Option<String>,
    /// Base URL for the weather API, the location is appended as a path segment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Background colour for the home page
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    /// Search history file
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    /// Directory for saved forecast snapshots
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    /// Socket address the web server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Append logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline/"
        .to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_bg_color() -> String {
    "#FFFFFF".to_string()
}

fn default_history_file() -> PathBuf {
    PathBuf::from("search_history.json")
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("saved_data")
}

fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherDeskConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            geocoding_url: default_geocoding_url(),
            bg_color: default_bg_color(),
            history_file: default_history_file(),
            snapshot_dir: default_snapshot_dir(),
            bind_address: default_bind_address(),
            timeout_seconds: default_timeout(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            log_file: None,
        }
    }
}

impl WeatherDeskConfig {
    /// Load configuration from the default file location and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path and the process environment
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_with_env(config_path, None)
    }

    /// Load configuration, reading environment overrides from `env` when given
    /// instead of the process environment
    pub fn load_with_env(
        config_path: Option<PathBuf>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(Environment::default().source(env));

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherDeskConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherdesk").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            self.api_key = None;
        }
        if self.base_url.is_empty() {
            self.base_url = default_base_url();
        }
        if self.geocoding_url.is_empty() {
            self.geocoding_url = default_geocoding_url();
        }
        if self.bg_color.is_empty() {
            self.bg_color = default_bg_color();
        }
        if self.history_file.as_os_str().is_empty() {
            self.history_file = default_history_file();
        }
        if self.snapshot_dir.as_os_str().is_empty() {
            self.snapshot_dir = default_snapshot_dir();
        }
        if self.bind_address.is_empty() {
            self.bind_address = default_bind_address();
        }
        if self.timeout_seconds == 0 {
            self.timeout_seconds = default_timeout();
        }
        if self.log_level.is_empty() {
            self.log_level = default_log_level();
        }
        if self.log_format.is_empty() {
            self.log_format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds > 300 {
            return Err(
                WeatherDeskError::config("Upstream timeout cannot exceed 300 seconds").into(),
            );
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(WeatherDeskError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.log_format.as_str()) {
            return Err(WeatherDeskError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.log_format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Weather API base URL", &self.base_url),
            ("Geocoding URL", &self.geocoding_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherDeskError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
