//! Builder for undo/redo reducers.

use crate::builder::error::BuildError;
use crate::core::{HistoryFilter, Snapshot};
use crate::undo::Undoable;
use std::sync::Arc;

/// Builder for [`Undoable`] with a fluent API.
pub struct UndoableBuilder<S, A> {
    initial: S,
    limit: Option<usize>,
    filter: Option<HistoryFilter<A>>,
}

impl<S, A> UndoableBuilder<S, A> {
    /// Create a builder starting from `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            limit: None,
            filter: None,
        }
    }

    /// Keep at most `n` past entries (optional).
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Add a history filter (optional).
    pub fn filter(mut self, filter: HistoryFilter<A>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Add a history filter using a closure (optional).
    pub fn record_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(HistoryFilter::new(predicate));
        self
    }

    /// Build the reducer around a present-value reducer.
    pub fn build<F>(self, reducer: F) -> Result<Undoable<S, A, F>, BuildError>
    where
        F: Fn(&Snapshot<S>, &A) -> Snapshot<S>,
    {
        if self.limit == Some(0) {
            return Err(BuildError::ZeroLimit);
        }

        Ok(Undoable::with_config(
            Arc::new(self.initial),
            reducer,
            self.filter.unwrap_or_default(),
            self.limit,
        ))
    }
}
