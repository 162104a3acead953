//! Configuration management for tagselect.
//!
//! Settings are read from a TOML file in the user's config directory and can
//! be overridden from the command line.

mod settings;

use thiserror::Error;

pub use settings::Settings;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),

    /// The config file is not valid TOML for the settings schema.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The settings are well-formed but contradictory.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
