//! Error types for the plant database.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantError {
    /// A plant record failed validation.
    #[error("Invalid plant '{name}': {reason}")]
    InvalidPlant { name: String, reason: String },

    /// Plot dimensions must be positive.
    #[error("Invalid plot dimensions {width} x {length}")]
    InvalidDimensions { width: f64, length: f64 },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for plant database operations.
pub type PlantResult<T> = Result<T, PlantError>;
