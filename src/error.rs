//! Error types for command replay

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::Encoding;
use crate::record::EntityKind;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised while decoding or applying a single command
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Cannot decode {encoding} command: {message}")]
    Decode { encoding: Encoding, message: String },

    #[error("unknown object {0}")]
    UnknownObject(String),

    #[error("unknown action {0}")]
    UnknownAction(String),

    #[error("{kind} with ID {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("update of {kind} is missing an id")]
    MissingId { kind: EntityKind },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl RecordError {
    /// Whether the command failed before any operation was executed: it could
    /// not be read, had an unsupported extension, could not be decoded, named
    /// an unknown object or action, or was an update without an id
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            RecordError::Decode { .. }
                | RecordError::UnknownObject(_)
                | RecordError::UnknownAction(_)
                | RecordError::MissingId { .. }
                | RecordError::UnsupportedFormat(_)
                | RecordError::Io(_)
                | RecordError::Walk(_)
        )
    }
}
