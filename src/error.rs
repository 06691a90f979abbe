//! Error types and handling for the `WeatherDesk` service

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Upstream service a request was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Geocoding,
    Weather,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Upstream::Geocoding => write!(f, "geocoding"),
            Upstream::Weather => write!(f, "weather"),
        }
    }
}

/// Main error type for the `WeatherDesk` service
#[derive(Error, Debug)]
pub enum WeatherDeskError {
    /// Network or HTTP failure talking to an upstream API
    #[error("{service} service unavailable: {message}")]
    UpstreamUnavailable { service: Upstream, message: String },

    /// Geocoding returned no results
    #[error("Location not found: {location}")]
    LocationNotFound { location: String },

    /// History file exists but is not a JSON array of entries
    #[error("Corrupt storage file {}: {message}", path.display())]
    StorageCorrupt { path: PathBuf, message: String },

    /// Writing a snapshot or history file failed
    #[error("Failed to write {}: {message}", path.display())]
    StorageWrite { path: PathBuf, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// A blocking storage task panicked or was cancelled
    #[error("Background task failed: {source}")]
    Task {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl WeatherDeskError {
    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(service: Upstream, message: S) -> Self {
        Self::UpstreamUnavailable {
            service,
            message: message.into(),
        }
    }

    pub fn location_not_found<S: Into<String>>(location: S) -> Self {
        Self::LocationNotFound {
            location: location.into(),
        }
    }

    pub fn storage_corrupt<S: Into<String>>(path: &Path, message: S) -> Self {
        Self::StorageCorrupt {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn storage_write<S: Into<String>>(path: &Path, message: S) -> Self {
        Self::StorageWrite {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherDeskError::UpstreamUnavailable {
                service: Upstream::Geocoding,
                ..
            } => "Error fetching location data.".to_string(),
            WeatherDeskError::UpstreamUnavailable {
                service: Upstream::Weather,
                ..
            } => "Error fetching weather data".to_string(),
            WeatherDeskError::LocationNotFound { .. } => "Location not found.".to_string(),
            WeatherDeskError::StorageWrite { .. } => "Error saving weather data.".to_string(),
            WeatherDeskError::StorageCorrupt { .. }
            | WeatherDeskError::Io { .. }
            | WeatherDeskError::Task { .. } => "Internal server error.".to_string(),
            WeatherDeskError::Config { message } => format!("Configuration error: {message}"),
        }
    }
}
