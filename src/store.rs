//! Single-threaded dispatch loop around a reducer.
//!
//! The store owns the reducer and the current state and runs one
//! transition at a time. `&mut self` on [`Store::dispatch`] is what
//! guarantees a transition completes before the next begins.

use crate::core::Reducer;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Listener notified after a dispatch replaced the state.
pub type Listener<T> = Box<dyn Fn(&Arc<T>) + Send + Sync>;

/// Holds the current state and dispatches actions through a reducer.
///
/// Listeners only run when the reducer returned a different `Arc`, so a
/// reducer honoring the identity contract never triggers redundant work.
///
/// # Example
///
/// ```rust
/// use retcon::builder::amended_history;
/// use retcon::core::Directed;
/// use retcon::store::Store;
/// use retcon::undo::UndoAction;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Add(i32);
///
/// impl Directed for Add {
///     type Id = u8;
/// }
///
/// impl UndoAction for Add {}
///
/// let mut store = Store::new(amended_history(0, |present: &Arc<i32>, add: &Add| {
///     if add.0 == 0 { Arc::clone(present) } else { Arc::new(**present + add.0) }
/// }));
///
/// store.dispatch(&Add(2));
/// store.dispatch(&Add(0));
/// assert_eq!(**store.state().present(), 2);
/// assert_eq!(store.changes(), 1);
/// ```
pub struct Store<R: Reducer> {
    reducer: R,
    state: Arc<R::State>,
    listeners: Vec<Listener<R::State>>,
    dispatched: usize,
    changes: usize,
}

impl<R> Store<R>
where
    R: Reducer,
    R::Action: Default,
{
    /// Initialize the state by reducing the empty action from nothing.
    pub fn new(mut reducer: R) -> Self {
        let state = reducer.reduce(None, &Default::default());
        Self {
            reducer,
            state,
            listeners: Vec::new(),
            dispatched: 0,
            changes: 0,
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Start from an existing state, for example one restored from a checkpoint.
    pub fn with_state(reducer: R, state: Arc<R::State>) -> Self {
        Self {
            reducer,
            state,
            listeners: Vec::new(),
            dispatched: 0,
            changes: 0,
        }
    }

    pub fn state(&self) -> &Arc<R::State> {
        &self.state
    }

    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Number of actions dispatched.
    pub fn dispatch_count(&self) -> usize {
        self.dispatched
    }

    /// Number of dispatches that replaced the state.
    pub fn changes(&self) -> usize {
        self.changes
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&Arc<R::State>) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Run one transition and return the resulting state.
    pub fn dispatch(&mut self, action: &R::Action) -> &Arc<R::State> {
        self.dispatched += 1;
        let next = self.reducer.reduce(Some(&self.state), action);

        if Arc::ptr_eq(&next, &self.state) {
            trace!(dispatched = self.dispatched, "state unchanged");
            return &self.state;
        }

        self.changes += 1;
        self.state = next;
        for listener in &self.listeners {
            listener(&self.state);
        }
        &self.state
    }
}

impl<R> fmt::Debug for Store<R>
where
    R: Reducer + fmt::Debug,
    R::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("reducer", &self.reducer)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("dispatched", &self.dispatched)
            .field("changes", &self.changes)
            .finish()
    }
}
