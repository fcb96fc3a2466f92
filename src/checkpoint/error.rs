//! Checkpoint error types.

use thiserror::Error;

/// Reasons a history could not be written to or rebuilt from a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The snapshot table or its references could not be encoded
    #[error("could not encode history checkpoint: {0}")]
    SerializationFailed(String),

    /// The input is not a well-formed history checkpoint
    #[error("could not decode history checkpoint: {0}")]
    DeserializationFailed(String),

    /// Written by a different checkpoint format
    #[error("history checkpoint format {found} cannot be restored (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// One or more indices point outside the snapshot table
    #[error("history checkpoint has {} broken snapshot reference(s)", .0.len())]
    InvalidReferences(Vec<ReferenceViolation>),
}

/// A single broken reference into the snapshot table
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceViolation {
    #[error("{position} refers to snapshot {index} but the table has {len} entries")]
    EntryOutOfRange {
        position: String,
        index: usize,
        len: usize,
    },

    #[error("operation {id} refers to snapshot {index} but the table has {len} entries")]
    PendingOutOfRange { id: String, index: usize, len: usize },

    #[error("operation {id} appears more than once")]
    DuplicateOperation { id: String },
}
