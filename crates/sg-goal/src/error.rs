// error.rs — Error types for the goal board subsystem.

use thiserror::Error;

/// Errors that can occur during goal board and goal store operations.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The config file could not be parsed.
    #[error("config error at {path}: {message}")]
    ConfigError { path: String, message: String },

    /// No goal with this id exists in the store.
    #[error("goal not found: {0}")]
    NotFound(String),

    /// The user identity cannot be used as a partition name.
    #[error("invalid user identity '{0}'")]
    InvalidUser(String),

    /// The action needs an existing goal open in the editor.
    #[error("cannot {action}: no existing goal is open in the editor")]
    NoGoalSelected { action: &'static str },

    /// The editor is closed, so there is nothing to submit.
    #[error("cannot submit: the goal editor is closed")]
    EditorClosed,
}
