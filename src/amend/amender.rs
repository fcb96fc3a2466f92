//! Reducer layer that folds provisional operations back into history.

use super::error::AmendError;
use super::past::{amend_past, find_snapshot};
use crate::core::{Directed, Directive, History, Merge, Reducer, Snapshot};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// History produced by an [`Amender`]: the wrapped history plus the
/// table of operations awaiting their END directive.
#[derive(Debug)]
pub struct AmendedHistory<S, Id> {
    history: Arc<History<S>>,
    pending: HashMap<Id, Snapshot<S>>,
}

impl<S, Id: Clone> Clone for AmendedHistory<S, Id> {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
            pending: self.pending.clone(),
        }
    }
}

impl<S, Id> AmendedHistory<S, Id> {
    /// Pair a history with its pending operations.
    ///
    /// Pending snapshots are matched by reference, so they should be
    /// clones of `Arc`s held by the history for END to find them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retcon::core::History;
    /// use retcon::AmendedHistory;
    /// use std::collections::HashMap;
    /// use std::sync::Arc;
    ///
    /// let history = Arc::new(History::new("draft"));
    /// let captured = Arc::clone(history.present());
    /// let state = AmendedHistory::new(history, HashMap::from([(1u32, captured)]));
    ///
    /// assert!(Arc::ptr_eq(&state.pending()[&1], state.present()));
    /// ```
    pub fn new(history: Arc<History<S>>, pending: HashMap<Id, Snapshot<S>>) -> Self {
        Self { history, pending }
    }

    /// The wrapped history value, as shared with the wrapped reducer.
    pub fn history(&self) -> &Arc<History<S>> {
        &self.history
    }

    /// Snapshots before the present, oldest first.
    pub fn past(&self) -> &[Snapshot<S>] {
        self.history.past()
    }

    /// The current snapshot.
    pub fn present(&self) -> &Snapshot<S> {
        self.history.present()
    }

    /// Snapshots available to redo, nearest first.
    pub fn future(&self) -> &[Snapshot<S>] {
        self.history.future()
    }

    /// Operations that have begun but not yet ended.
    pub fn pending(&self) -> &HashMap<Id, Snapshot<S>> {
        &self.pending
    }
}

/// Wraps an undo/redo reducer and handles BEGIN/END directives.
///
/// On BEGIN the present snapshot is captured under the operation id. On
/// END the most recent `past` entry that is that snapshot is located, the
/// merge function is applied to it and every newer `past` entry, and the
/// entry the wrapped reducer pushed for the END action itself is dropped.
/// An END that cannot be matched is logged and treated as an ordinary
/// action.
///
/// When the wrapped reducer returns the same history it produced on the
/// previous call, the amender hands back the caller's state unchanged.
///
/// # Example
///
/// ```rust
/// use retcon::amend::Amender;
/// use retcon::core::{Directed, Directive, Reducer};
/// use retcon::undo::{UndoAction, Undoable};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Op {
///     value: i32,
///     directive: Option<Directive<&'static str>>,
/// }
///
/// impl Directed for Op {
///     type Id = &'static str;
///     fn directive(&self) -> Directive<&'static str> {
///         self.directive.clone().unwrap_or(Directive::Ordinary)
///     }
/// }
///
/// impl UndoAction for Op {}
///
/// let inner = Undoable::new(0, |present: &Arc<i32>, op: &Op| {
///     if op.value == 0 { Arc::clone(present) } else { Arc::new(op.value) }
/// });
/// let mut amender = Amender::new(inner);
///
/// let state = amender.reduce(None, &Op { value: 1, directive: Some(Directive::Begin("drag")) });
/// assert!(state.pending().contains_key("drag"));
///
/// let state = amender.reduce(Some(&state), &Op { value: 2, directive: None });
/// let state = amender.reduce(Some(&state), &Op { value: 3, directive: Some(Directive::End("drag")) });
///
/// assert!(state.pending().is_empty());
/// assert_eq!(**state.present(), 3);
/// ```
pub struct Amender<S, R>
where
    R: Reducer<State = History<S>>,
{
    inner: R,
    merge: Merge<S, R::Action>,
    last_wrapped: Option<Arc<History<S>>>,
}

impl<S, R> Amender<S, R>
where
    R: Reducer<State = History<S>>,
    R::Action: Directed + Default,
{
    /// Wrap `inner` using the identity merge.
    pub fn new(inner: R) -> Self {
        Self::with_merge(inner, Merge::identity())
    }

    /// Wrap `inner`, rewriting amended entries with `merge`.
    ///
    /// `merge` receives the present at END time, the entry being rewritten
    /// and the END action. [`AmenderBuilder`](crate::builder::AmenderBuilder)
    /// accepts a plain closure instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retcon::amend::Amender;
    /// use retcon::core::{Directed, Merge};
    /// use retcon::undo::{UndoAction, Undoable};
    /// use std::sync::Arc;
    ///
    /// #[derive(Default)]
    /// struct Nudge(i32);
    ///
    /// impl Directed for Nudge {
    ///     type Id = u8;
    /// }
    ///
    /// impl UndoAction for Nudge {}
    ///
    /// let inner = Undoable::new(0, |present: &Arc<i32>, n: &Nudge| Arc::new(**present + n.0));
    /// let keep_present = Merge::new(|present: &Arc<i32>, _: &Arc<i32>, _: &Nudge| Arc::clone(present));
    /// let amender = Amender::with_merge(inner, keep_present);
    /// assert_eq!(amender.inner().limit(), None);
    /// ```
    pub fn with_merge(inner: R, merge: Merge<S, R::Action>) -> Self {
        Self {
            inner,
            merge,
            last_wrapped: None,
        }
    }

    /// The wrapped undo/redo reducer.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Build the initial state from the wrapped reducer's baseline.
    fn initial(&mut self) -> Arc<AmendedHistory<S, <R::Action as Directed>::Id>> {
        let baseline = self.inner.reduce(None, &Default::default());
        Arc::new(AmendedHistory::new(baseline, HashMap::new()))
    }

    /// Fold the operation `id` into `wrapped.past`.
    fn fold(
        &self,
        state: &AmendedHistory<S, <R::Action as Directed>::Id>,
        wrapped: &History<S>,
        id: &<R::Action as Directed>::Id,
        action: &R::Action,
    ) -> Result<AmendedHistory<S, <R::Action as Directed>::Id>, AmendError> {
        let snapshot = state
            .pending
            .get(id)
            .ok_or_else(|| AmendError::UnknownOperation {
                id: format!("{id:?}"),
            })?;
        let from = find_snapshot(wrapped.past(), snapshot).ok_or_else(|| {
            AmendError::SnapshotNotInPast {
                id: format!("{id:?}"),
            }
        })?;

        debug!(
            operation = ?id,
            from,
            rewritten = wrapped.past().len() - from,
            "amending history"
        );
        let past = amend_past(wrapped.past(), from, wrapped.present(), action, &self.merge);

        let mut pending = state.pending.clone();
        pending.remove(id);

        Ok(AmendedHistory::new(Arc::new(wrapped.with_past(past)), pending))
    }
}

impl<S, R> Reducer for Amender<S, R>
where
    R: Reducer<State = History<S>>,
    R::Action: Directed + Default,
{
    type State = AmendedHistory<S, <R::Action as Directed>::Id>;
    type Action = R::Action;

    fn reduce(&mut self, state: Option<&Arc<Self::State>>, action: &Self::Action) -> Arc<Self::State> {
        let state = match state {
            Some(state) => Arc::clone(state),
            None => self.initial(),
        };

        let wrapped = self.inner.reduce(Some(&state.history), action);
        let unchanged = self
            .last_wrapped
            .as_ref()
            .is_some_and(|last| Arc::ptr_eq(last, &wrapped));
        self.last_wrapped = Some(Arc::clone(&wrapped));

        match action.directive() {
            Directive::Begin(id) => {
                self.last_wrapped = None;
                trace!(operation = ?id, "operation begun");
                let mut pending = state.pending.clone();
                pending.insert(id, Arc::clone(wrapped.present()));
                return Arc::new(AmendedHistory::new(wrapped, pending));
            }
            Directive::End(id) => {
                self.last_wrapped = None;
                match self.fold(&state, &wrapped, &id, action) {
                    Ok(amended) => return Arc::new(amended),
                    Err(err) => {
                        warn!(
                            operation = err.id(),
                            reason = %err,
                            "history could not be amended: invalid operation id"
                        );
                    }
                }
            }
            Directive::Ordinary => {}
        }

        if unchanged {
            state
        } else {
            Arc::new(AmendedHistory::new(wrapped, state.pending.clone()))
        }
    }
}

impl<S, R> fmt::Debug for Amender<S, R>
where
    R: Reducer<State = History<S>> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Amender")
            .field("inner", &self.inner)
            .field("cached", &self.last_wrapped.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wrapped reducer that records every action except `Noop`, which
    /// returns the given history unchanged.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: usize,
    }

    #[derive(Debug, Clone, Default)]
    enum TestAction {
        #[default]
        Init,
        Set(&'static str),
        Noop,
        Begin(u32, &'static str),
        End(u32, &'static str),
    }

    impl Directed for TestAction {
        type Id = u32;

        fn directive(&self) -> Directive<u32> {
            match self {
                Self::Begin(id, _) => Directive::Begin(*id),
                Self::End(id, _) => Directive::End(*id),
                _ => Directive::Ordinary,
            }
        }
    }

    impl Reducer for Recorder {
        type State = History<&'static str>;
        type Action = TestAction;

        fn reduce(
            &mut self,
            state: Option<&Arc<Self::State>>,
            action: &TestAction,
        ) -> Arc<Self::State> {
            self.calls += 1;
            let Some(state) = state else {
                return Arc::new(History::new("init"));
            };
            match action {
                TestAction::Init | TestAction::Noop => Arc::clone(state),
                TestAction::Set(value)
                | TestAction::Begin(_, value)
                | TestAction::End(_, value) => Arc::new(state.record(Arc::new(*value), None)),
            }
        }
    }

    fn past_values(state: &AmendedHistory<&'static str, u32>) -> Vec<&'static str> {
        state.past().iter().map(|s| **s).collect()
    }

    #[test]
    fn initializes_from_wrapped_baseline() {
        let mut amender = Amender::new(Recorder::default());
        let state = amender.reduce(None, &TestAction::Noop);

        assert_eq!(**state.present(), "init");
        assert!(state.pending().is_empty());
        assert_eq!(amender.inner().calls, 2);
    }

    #[test]
    fn begin_captures_present_after_action() {
        let mut amender = Amender::new(Recorder::default());
        let state = amender.reduce(None, &TestAction::Begin(1, "p0"));

        let captured = state.pending().get(&1).unwrap();
        assert!(Arc::ptr_eq(captured, state.present()));
        assert_eq!(**captured, "p0");
    }

    #[test]
    fn second_begin_overwrites_capture() {
        let mut amender = Amender::new(Recorder::default());
        let state = amender.reduce(None, &TestAction::Begin(1, "a"));
        let state = amender.reduce(Some(&state), &TestAction::Begin(1, "b"));

        assert_eq!(state.pending().len(), 1);
        assert_eq!(**state.pending().get(&1).unwrap(), "b");
    }

    #[test]
    fn end_folds_and_trims() {
        let merge = Merge::new(|_: &Arc<&'static str>, _: &Arc<&'static str>, _: &TestAction| {
            Arc::new("merged")
        });
        let mut amender = Amender::with_merge(Recorder::default(), merge);

        let state = amender.reduce(None, &TestAction::Begin(7, "p0"));
        let state = amender.reduce(Some(&state), &TestAction::Set("p1"));
        let state = amender.reduce(Some(&state), &TestAction::Set("p2"));
        assert_eq!(past_values(&state), vec!["init", "p0", "p1"]);

        let state = amender.reduce(Some(&state), &TestAction::End(7, "p3"));

        assert_eq!(past_values(&state), vec!["init", "merged", "merged"]);
        assert_eq!(**state.present(), "p3");
        assert!(!state.pending().contains_key(&7));
    }

    #[test]
    fn end_with_unknown_id_passes_through() {
        let mut amender = Amender::new(Recorder::default());
        let state = amender.reduce(None, &TestAction::Set("a"));
        let state = amender.reduce(Some(&state), &TestAction::End(99, "b"));

        assert_eq!(past_values(&state), vec!["init", "a"]);
        assert_eq!(**state.present(), "b");
    }

    #[test]
    fn ordinary_noop_returns_same_reference() {
        let mut amender = Amender::new(Recorder::default());
        let state = amender.reduce(None, &TestAction::Set("a"));
        let next = amender.reduce(Some(&state), &TestAction::Noop);

        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn pending_survives_ordinary_actions() {
        let mut amender = Amender::new(Recorder::default());
        let state = amender.reduce(None, &TestAction::Begin(3, "a"));
        let state = amender.reduce(Some(&state), &TestAction::Set("b"));
        let state = amender.reduce(Some(&state), &TestAction::Noop);

        assert!(state.pending().contains_key(&3));
    }
}
