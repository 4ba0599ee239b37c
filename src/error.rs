//! Error types for talkctl

use std::io;
use thiserror::Error;

/// Main error type for talkctl
#[derive(Error, Debug)]
pub enum TalkctlError {
    #[error("Speech driver error: {0}")]
    Driver(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for talkctl operations
pub type Result<T> = std::result::Result<T, TalkctlError>;

impl From<String> for TalkctlError {
    fn from(s: String) -> Self {
        TalkctlError::Other(s)
    }
}

impl From<&str> for TalkctlError {
    fn from(s: &str) -> Self {
        TalkctlError::Other(s.to_string())
    }
}
