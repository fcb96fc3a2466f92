//! Retroactive amendment of undo/redo histories.
//!
//! An [`Amender`] wraps any reducer producing a [`History`](crate::core::History)
//! and lets a caller mark the start of a long-running operation (BEGIN),
//! keep applying unrelated changes, and later fold a correction into every
//! history entry recorded since (END) without adding an undo step for the
//! END itself.
//!
//! # Failure handling
//!
//! An END whose id was never begun, or whose captured snapshot has left
//! `past` (for example after undo and a new change), is logged at `warn`
//! level and processed as an ordinary action.

mod amender;
mod error;
mod past;

pub use amender::{AmendedHistory, Amender};
pub use error::AmendError;
pub use past::{amend_past, find_snapshot};
