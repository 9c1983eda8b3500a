//! Error types for FileMap
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FileMapError
pub type Result<T> = std::result::Result<T, FileMapError>;

/// Unified error type for FileMap operations
#[derive(Debug, Error)]
pub enum FileMapError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file shrank between sampling its size and reading it
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: u64, actual: u64 },

    /// An entry was listed but its value could not be read
    #[error("Failed to read entry {key:?}: {source}")]
    EntryRead {
        key: Vec<u8>,
        #[source]
        source: Box<FileMapError>,
    },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),
}

impl FileMapError {
    /// The key of the entry this error belongs to, when known
    pub fn key(&self) -> Option<&[u8]> {
        match self {
            FileMapError::EntryRead { key, .. } => Some(key),
            _ => None,
        }
    }
}
