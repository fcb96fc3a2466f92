//! Predicates deciding which actions become undoable history entries.
//!
//! Filters are pure boolean functions over actions. An action rejected by
//! the filter still updates the present, but the previous present is not
//! pushed onto `past`.

use std::fmt;

/// Pure predicate that decides whether an action is recorded in history.
///
/// # Example
///
/// ```rust
/// use retcon::core::HistoryFilter;
///
/// #[derive(Debug)]
/// enum Edit {
///     Insert(char),
///     MoveCursor(usize),
/// }
///
/// // Cursor movement is not worth an undo step
/// let filter = HistoryFilter::new(|edit: &Edit| !matches!(edit, Edit::MoveCursor(_)));
///
/// assert!(filter.check(&Edit::Insert('a')));
/// assert!(!filter.check(&Edit::MoveCursor(3)));
/// ```
pub struct HistoryFilter<A> {
    predicate: Box<dyn Fn(&A) -> bool + Send + Sync>,
}

impl<A> HistoryFilter<A> {
    /// Create a filter from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        HistoryFilter {
            predicate: Box::new(predicate),
        }
    }

    /// A filter that records every action.
    pub fn record_all() -> Self {
        Self::new(|_| true)
    }

    /// Check whether the action should produce a history entry.
    pub fn check(&self, action: &A) -> bool {
        (self.predicate)(action)
    }
}

impl<A> Default for HistoryFilter<A> {
    fn default() -> Self {
        Self::record_all()
    }
}

impl<A> fmt::Debug for HistoryFilter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryFilter").finish_non_exhaustive()
    }
}
