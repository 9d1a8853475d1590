//! Error types for the level model crate.
//!
//! All error types use `thiserror` for ergonomic error handling. Errors are
//! file-scoped: a decoding failure condemns one level document, never a
//! whole corpus run.

use std::io;
use thiserror::Error;

/// Errors that can occur while decoding, validating, or persisting a level.
#[derive(Error, Debug)]
pub enum LevelError {
    /// A legacy laser carried an unrecognized kind tag.
    #[error("Unknown laser kind: {kind}")]
    UnknownLaserKind {
        /// The unrecognized discriminator tag.
        kind: String,
    },

    /// A field required by the schema is absent.
    #[error("Missing field '{field}' in {context}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
        /// Where the field was expected.
        context: &'static str,
    },

    /// An endpoint path violates the model invariants.
    #[error("Invalid endpoint path: {reason}")]
    InvalidEndpointPath {
        /// Why the path is invalid.
        reason: String,
    },

    /// A laser record violates the model invariants.
    #[error("Invalid laser '{id}': {reason}")]
    InvalidLaser {
        /// The laser's stable identifier.
        id: String,
        /// Why the record is invalid.
        reason: String,
    },

    /// A button record violates the model invariants.
    #[error("Invalid button: {reason}")]
    InvalidButton {
        /// Why the record is invalid.
        reason: String,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for level model operations.
pub type Result<T> = std::result::Result<T, LevelError>;
