//! Error types shared across pageflash crates.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias using the core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading configuration or resolving locale data.
#[derive(Debug, Error)]
pub enum Error {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The config file exists but could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// One or more configuration values are out of range.
    #[error("invalid configuration:\n  - {}", .0.join("\n  - "))]
    ConfigValidation(Vec<String>),

    /// The requested number locale has no formatting rules.
    #[error("unsupported locale '{0}', expected one of: id-ID, en-US, de-DE, fr-FR")]
    UnsupportedLocale(String),
}
