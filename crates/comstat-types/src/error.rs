//! Error types for ComStat.

use std::io;

/// Errors produced by the ComStat crates.
#[derive(Debug, thiserror::Error)]
pub enum ComstatError {
    #[error("command error: {0}")]
    Command(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ComstatError>;
