//! Undo/redo container over a plain present-value reducer.
//!
//! [`Undoable`] is the layer an [`Amender`](crate::amend::Amender) usually
//! wraps. It keeps the `Reducer` identity contract: any action that leaves
//! the history untouched returns the given `Arc`.

mod undoable;

pub use undoable::Undoable;

/// History navigation requested by an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoCommand {
    Undo,
    Redo,
    /// Negative values undo, positive values redo
    Jump(isize),
    ClearHistory,
}

/// Actions understood by [`Undoable`].
///
/// Actions returning `None` are handed to the present-value reducer.
pub trait UndoAction {
    fn undo_command(&self) -> Option<UndoCommand> {
        None
    }
}
