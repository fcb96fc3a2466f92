//! The undo/redo reducer.

use super::{UndoAction, UndoCommand};
use crate::core::{History, HistoryFilter, Reducer, Snapshot};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// Reducer that records each change of the present as an undo step.
///
/// `reducer` maps the present snapshot and an action to the next present.
/// Returning the same `Arc` means the action changed nothing.
///
/// # Example
///
/// ```rust
/// use retcon::core::Reducer;
/// use retcon::undo::{UndoAction, UndoCommand, Undoable};
/// use std::sync::Arc;
///
/// enum Counter {
///     Add(i32),
///     Undo,
/// }
///
/// impl UndoAction for Counter {
///     fn undo_command(&self) -> Option<UndoCommand> {
///         matches!(self, Self::Undo).then_some(UndoCommand::Undo)
///     }
/// }
///
/// let mut undoable = Undoable::new(0, |present: &Arc<i32>, action: &Counter| match action {
///     Counter::Add(n) => Arc::new(**present + n),
///     Counter::Undo => Arc::clone(present),
/// });
///
/// let state = undoable.reduce(None, &Counter::Add(2));
/// let state = undoable.reduce(Some(&state), &Counter::Add(3));
/// assert_eq!(**state.present(), 5);
///
/// let state = undoable.reduce(Some(&state), &Counter::Undo);
/// assert_eq!(**state.present(), 2);
/// ```
pub struct Undoable<S, A, F>
where
    F: Fn(&Snapshot<S>, &A) -> Snapshot<S>,
{
    initial: Snapshot<S>,
    reducer: F,
    filter: HistoryFilter<A>,
    limit: Option<usize>,
    _phantom: PhantomData<fn(&A)>,
}

impl<S, A, F> Undoable<S, A, F>
where
    F: Fn(&Snapshot<S>, &A) -> Snapshot<S>,
{
    /// Unlimited history, every change recorded.
    pub fn new(initial: S, reducer: F) -> Self {
        Self::with_config(Arc::new(initial), reducer, HistoryFilter::record_all(), None)
    }

    pub(crate) fn with_config(
        initial: Snapshot<S>,
        reducer: F,
        filter: HistoryFilter<A>,
        limit: Option<usize>,
    ) -> Self {
        Self {
            initial,
            reducer,
            filter,
            limit,
            _phantom: PhantomData,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn navigate(history: &Arc<History<S>>, command: UndoCommand) -> Option<History<S>> {
        match command {
            UndoCommand::Undo => history.undo(),
            UndoCommand::Redo => history.redo(),
            UndoCommand::Jump(steps) => history.jump(steps),
            UndoCommand::ClearHistory => {
                (history.can_undo() || history.can_redo()).then(|| history.cleared())
            }
        }
    }
}

impl<S, A, F> Reducer for Undoable<S, A, F>
where
    A: UndoAction,
    F: Fn(&Snapshot<S>, &A) -> Snapshot<S>,
{
    type State = History<S>;
    type Action = A;

    fn reduce(&mut self, state: Option<&Arc<History<S>>>, action: &A) -> Arc<History<S>> {
        let history = match state {
            Some(history) => Arc::clone(history),
            None => Arc::new(History::from_present(Arc::clone(&self.initial))),
        };

        if let Some(command) = action.undo_command() {
            return match Self::navigate(&history, command) {
                Some(next) => {
                    trace!(?command, "history navigated");
                    Arc::new(next)
                }
                None => history,
            };
        }

        let present = (self.reducer)(history.present(), action);
        if Arc::ptr_eq(&present, history.present()) {
            return history;
        }

        if self.filter.check(action) {
            Arc::new(history.record(present, self.limit))
        } else {
            Arc::new(history.replace_present(present))
        }
    }
}

impl<S, A, F> fmt::Debug for Undoable<S, A, F>
where
    S: fmt::Debug,
    F: Fn(&Snapshot<S>, &A) -> Snapshot<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Undoable")
            .field("initial", &self.initial)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
