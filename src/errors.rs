//! Error types for the jot application.
//!
//! This module defines the error type returned by every fallible operation,
//! from loading the configuration to writing a note to disk.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the jot application.
#[derive(Error, Debug)]
pub enum JotError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The save directory exists but cannot be written to.
    #[error("The save directory is not writable: {}", path.display())]
    DirectoryNotWritable { path: PathBuf },

    /// Directory creation failed.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{message}")]
    EditorError { message: String },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },
}
