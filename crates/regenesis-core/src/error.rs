//! Error handling for ReGenesis
//!
//! A single error type covers the model layer: property validation, tree
//! structure violations, polygon editing limits and project file I/O.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Model-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A user-supplied value failed validation.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The property or field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A tree node could not be found.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// An operation would break the project/region hierarchy.
    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// A polygon would end up with too few vertices.
    #[error("Polygon needs at least {minimum} vertices, got {count}")]
    TooFewVertices {
        /// Vertex count after the rejected operation.
        count: usize,
        /// The minimum allowed vertex count.
        minimum: usize,
    },

    /// A vertex index was outside the polygon.
    #[error("Vertex index {index} out of range for polygon with {len} vertices")]
    VertexOutOfRange {
        /// The requested index.
        index: usize,
        /// The polygon's vertex count.
        len: usize,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidValue`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::Other`].
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;
