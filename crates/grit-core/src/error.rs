//! Error types for Grit

use thiserror::Error;

/// The main error type for Grit operations
#[derive(Debug, Error)]
pub enum GritError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Audio error: {0}")]
    AudioError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Grit operations
pub type Result<T> = std::result::Result<T, GritError>;

impl From<toml::de::Error> for GritError {
    fn from(err: toml::de::Error) -> Self {
        GritError::TomlParseError(err.to_string())
    }
}
