//! Configuration loading traits and types.
//!
//! This module provides the standardized way to load TOML configuration
//! files used by the supervisor binary: the controller configuration (first
//! CLI argument) and the logging configuration (second CLI argument).
//!
//! # Usage
//!
//! ```rust,no_run
//! use roboclaw_common::config::{ConfigLoader, ConfigError, LoggingConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let logging = LoggingConfig::load(Path::new("logging.toml"))?;
//!     println!("Level: {:?}", logging.level);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration, loaded from the second CLI argument.
///
/// # TOML Example
///
/// ```toml
/// level = "debug"
/// json = false
/// filter = "roboclaw_hal=warn"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub level: LogLevel,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Additional comma-separated `EnvFilter` directives.
    #[serde(default)]
    pub filter: Option<String>,

    /// Include thread names (one per monitor) in every record.
    #[serde(default)]
    pub with_thread_names: bool,
}

impl LoggingConfig {
    /// Directive list for the subscriber filter: base level first, then the
    /// extra directives in configuration order.
    pub fn directives(&self) -> Vec<String> {
        let mut directives = vec![self.level.as_directive().to_string()];
        if let Some(filter) = &self.filter {
            directives.extend(
                filter
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            );
        }
        directives
    }
}

/// Trait for loading configuration from TOML files.
///
/// Default implementation works with any type implementing
/// `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from an in-memory TOML document.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
