//! Error types for the highlighter pipeline

use thiserror::Error;

/// Result type alias for highlighter operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
///
/// Every variant is a configuration-time or command-time failure; none of them
/// is produced while a frame is being rendered.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("this highlighter does not hold children")]
    UnsupportedOperation,

    #[error("no such highlighter: '{0}'")]
    NotFound(String),

    #[error("highlighter '{0}' is not a group")]
    NotComposite(String),

    #[error("duplicate highlighter id: '{0}'")]
    DuplicateIdentifier(String),

    #[error("no such highlighter type: '{0}'")]
    UnknownType(String),

    #[error("{0}")]
    BadParameters(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl HighlightError {
    /// Shorthand for a parameter validation failure
    pub fn bad_params(msg: impl Into<String>) -> Self {
        Self::BadParameters(msg.into())
    }
}
