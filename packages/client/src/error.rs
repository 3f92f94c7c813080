//! Error types for the Irori client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server URL cannot be used at all
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unknown command '{0}' (try /code, /lock, /unlock, /upload, /show, /quit)")]
    UnknownCommand(String),

    #[error("Command '{0}' needs an argument")]
    MissingArgument(String),

    /// Another member has locked the editor
    #[error("The editor is locked by another member")]
    EditorLocked,

    #[error("Failed to read '{path}': {reason}")]
    FileRead { path: String, reason: String },
}
