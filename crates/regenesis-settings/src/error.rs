//! Error types for the settings crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing preferences.
#[derive(Error, Debug)]
pub enum PreferencesError {
    /// The user's home directory could not be determined.
    #[error("Could not determine the home directory")]
    HomeDirectory,

    /// A dotted preference key is malformed or crosses a non-object value.
    #[error("Invalid preference key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PreferencesError {
    pub(crate) fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for preference operations.
pub type PreferencesResult<T> = Result<T, PreferencesError>;
