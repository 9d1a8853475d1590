//! Error types for the migration crate.

use std::io;
use std::path::PathBuf;

use laserkit_core::LevelError;
use thiserror::Error;

/// Errors that can occur while migrating a level corpus.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The levels root does not exist or is not a directory.
    #[error("Levels directory not found: {}", .0.display())]
    LevelsDirNotFound(PathBuf),

    /// The levels root contains no `*.json` files at all.
    #[error("No level files found under {}", .0.display())]
    NoLevelFiles(PathBuf),

    /// Decoding or validating level data failed.
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
