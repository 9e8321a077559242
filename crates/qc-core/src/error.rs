//! Error types for qc-core

use thiserror::Error;

/// Main error type for qc-core
#[derive(Error, Debug)]
pub enum Error {
    /// The command text did not contain a chat title
    #[error("chat title is empty")]
    EmptyTitle,

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for qc-core
pub type Result<T> = std::result::Result<T, Error>;
