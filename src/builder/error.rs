//! Build errors for history builders.

use thiserror::Error;

/// Errors that can occur when building reducers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("History limit must be at least 1. Omit .limit() for unlimited history")]
    ZeroLimit,
}
