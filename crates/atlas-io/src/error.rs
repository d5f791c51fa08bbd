//! Error types for strip-mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for strip-mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during strip-mesh decode and export.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// A declared count cannot be satisfied by the remaining bytes.
    #[error("unexpected end of data at byte {position}")]
    UnexpectedEof {
        /// Byte offset at which the shortfall was detected.
        position: u64,
    },

    /// Invalid file content (inconsistent data).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vertex deduplication index misuse surfaced through export.
    #[error("vertex index error: {0}")]
    Index(#[from] atlas_types::IndexError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
