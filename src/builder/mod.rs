//! Builder API for ergonomic reducer construction.
//!
//! This module provides fluent builders for undo/redo reducers and the
//! amenders wrapping them.

pub mod amender;
pub mod error;
pub mod undoable;

pub use amender::AmenderBuilder;
pub use error::BuildError;
pub use undoable::UndoableBuilder;

use crate::amend::Amender;
use crate::core::{Directed, Snapshot};
use crate::undo::{UndoAction, Undoable};

/// Create an amender over an unlimited, unfiltered undo history.
///
/// # Example
///
/// ```
/// use retcon::builder::amended_history;
/// use retcon::core::{Directed, Reducer};
/// use retcon::undo::UndoAction;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Bump(u32);
///
/// impl Directed for Bump {
///     type Id = u32;
/// }
///
/// impl UndoAction for Bump {}
///
/// let mut amender = amended_history(0u32, |present: &Arc<u32>, bump: &Bump| {
///     Arc::new(**present + bump.0)
/// });
///
/// let state = amender.reduce(None, &Bump(4));
/// assert_eq!(**state.present(), 4);
/// ```
pub fn amended_history<S, A, F>(initial: S, reducer: F) -> Amender<S, Undoable<S, A, F>>
where
    A: Directed + UndoAction + Default,
    F: Fn(&Snapshot<S>, &A) -> Snapshot<S>,
{
    AmenderBuilder::new(Undoable::new(initial, reducer)).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Directive, Reducer};
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct Set(Option<i32>, Option<Directive<&'static str>>);

    impl Directed for Set {
        type Id = &'static str;

        fn directive(&self) -> Directive<&'static str> {
            self.1.clone().unwrap_or(Directive::Ordinary)
        }
    }

    impl UndoAction for Set {}

    fn set(present: &Arc<i32>, action: &Set) -> Arc<i32> {
        action.0.map_or_else(|| Arc::clone(present), Arc::new)
    }

    #[test]
    fn amended_history_wires_layers() {
        let mut amender = amended_history(0, set);

        let state = amender.reduce(None, &Set(Some(1), Some(Directive::Begin("op"))));
        assert!(state.pending().contains_key("op"));

        let state = amender.reduce(Some(&state), &Set(Some(2), None));
        let state = amender.reduce(Some(&state), &Set(Some(3), Some(Directive::End("op"))));

        assert!(state.pending().is_empty());
        assert_eq!(state.past().len(), 2);
    }
}
