//! # Configuration Management for sqljson
//!
//! This crate provides the formatting settings shared by the sqljson adapters.
//! Nothing here is read implicitly: callers load a [`TypeConfig`] once and pass
//! the relevant section to the `*_with` conversion functions.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{JsonConfig, SecondsPrecision, TimestampConfig};
//!
//! let timestamp = TimestampConfig::new(SecondsPrecision::Millis, true);
//! let json = JsonConfig::new(false);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [timestamp]
//! precision = "millis"
//! use_z = true
//!
//! [json]
//! trailing_newline = false
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::TypeConfig;
//!
//! // Load from SQLJSON_CONFIG, ./sqljson.toml, or defaults
//! let config = TypeConfig::load()?;
//!
//! // Or load from custom path
//! let config = TypeConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./sqljson.toml";
const CONFIG_PATH_VAR: &str = "SQLJSON_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
}

/// Complete adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeConfig {
    pub timestamp: TimestampConfig,
    pub json: JsonConfig,
}

/// Fractional second digits used when rendering timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondsPrecision {
    /// As many digits as needed: 0, 3, 6 or 9
    #[default]
    Auto,
    Secs,
    Millis,
    Micros,
    Nanos,
}

/// Timestamp rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampConfig {
    pub precision: SecondsPrecision,
    /// Render UTC as `Z` instead of `+00:00`
    pub use_z: bool,
}

/// JSON column encoding configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Terminate encoded column text with `\n`, as a streaming encoder would
    pub trailing_newline: bool,
}

impl TypeConfig {
    /// Load configuration from the TOML file named in the environment or defaults
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        // Explicit path from .env or the process environment
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)
        }
        // Fall back to DEFAULT_CONFIG_PATH
        else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            #[cfg(feature = "debug-logging")]
            tracing::debug!("no sqljson config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        #[cfg(feature = "debug-logging")]
        tracing::debug!("loading sqljson config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

impl TimestampConfig {
    /// Create a new timestamp configuration
    pub fn new(precision: SecondsPrecision, use_z: bool) -> Self {
        Self { precision, use_z }
    }
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self::new(SecondsPrecision::Auto, true)
    }
}

impl JsonConfig {
    /// Create a new JSON configuration
    pub fn new(trailing_newline: bool) -> Self {
        Self { trailing_newline }
    }
}
