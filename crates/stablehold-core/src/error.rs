//! Core error types for stablehold-core.
//!
//! The pure components (progress, period, selection) fail only on
//! configuration mistakes and surface them immediately. The boundary
//! collaborators (waitlist store, weather provider) carry their own
//! error enums so callers can decide on fallbacks.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stablehold-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed date or out-of-range argument given to the progress calculator
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Timezone identifier the tz database cannot resolve
    #[error("Unsupported timezone: {0}")]
    UnsupportedTimezone(String),

    /// Selector given zero candidates or zero total weight
    #[error("Selection catalog is empty or has zero total weight")]
    EmptyCatalog,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session store errors
    #[error("Session store error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Missing required configuration value (usually a secret from the environment)
    #[error("Missing required configuration: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
