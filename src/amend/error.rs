//! Amendment error types.

use thiserror::Error;

/// Reasons an END directive could not amend history.
///
/// Both variants are recoverable: the directive is downgraded to an
/// ordinary action after the error is logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmendError {
    /// No BEGIN is pending for the id
    #[error("history could not be amended: invalid operation id {id}")]
    UnknownOperation { id: String },

    /// The captured snapshot is no longer anywhere in `past`
    #[error("history could not be amended: invalid operation id {id} (snapshot left history)")]
    SnapshotNotInPast { id: String },
}

impl AmendError {
    /// The operation id, rendered with `Debug`.
    pub fn id(&self) -> &str {
        match self {
            Self::UnknownOperation { id } | Self::SnapshotNotInPast { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_shared_by_both_variants() {
        let unknown = AmendError::UnknownOperation { id: "7".to_string() };
        let gone = AmendError::SnapshotNotInPast { id: "\"drag\"".to_string() };

        assert_eq!(unknown.id(), "7");
        assert_eq!(gone.id(), "\"drag\"");
    }

    #[test]
    fn messages_name_the_operation() {
        let err = AmendError::UnknownOperation { id: "7".to_string() };
        assert_eq!(
            err.to_string(),
            "history could not be amended: invalid operation id 7"
        );
    }
}
