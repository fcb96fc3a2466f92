//! Merge functions used to fold an amendment into past snapshots.

use super::history::Snapshot;
use std::fmt;
use std::sync::Arc;

/// Pure function `(present, past_entry, action) -> snapshot`.
///
/// Invoked once per rewritten past entry when an operation ends. The
/// default merge returns the past entry unchanged, preserving its
/// identity.
///
/// # Example
///
/// ```rust
/// use retcon::core::Merge;
/// use std::sync::Arc;
///
/// // Carry the final title into every intermediate snapshot
/// let merge = Merge::new(|present: &Arc<(String, u32)>, entry: &Arc<(String, u32)>, _: &()| {
///     Arc::new((present.0.clone(), entry.1))
/// });
///
/// let present = Arc::new(("final".to_string(), 3));
/// let entry = Arc::new(("draft".to_string(), 1));
/// let merged = merge.apply(&present, &entry, &());
/// assert_eq!(*merged, ("final".to_string(), 1));
/// ```
pub struct Merge<S, A> {
    merge: Box<dyn Fn(&Snapshot<S>, &Snapshot<S>, &A) -> Snapshot<S> + Send + Sync>,
}

impl<S, A> Merge<S, A> {
    pub fn new<F>(merge: F) -> Self
    where
        F: Fn(&Snapshot<S>, &Snapshot<S>, &A) -> Snapshot<S> + Send + Sync + 'static,
    {
        Self {
            merge: Box::new(merge),
        }
    }

    /// Merge that keeps every past entry as it was.
    pub fn identity() -> Self {
        Self::new(|_, entry, _| Arc::clone(entry))
    }

    pub fn apply(&self, present: &Snapshot<S>, entry: &Snapshot<S>, action: &A) -> Snapshot<S> {
        (self.merge)(present, entry, action)
    }
}

impl<S, A> Default for Merge<S, A> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S, A> fmt::Debug for Merge<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merge").finish_non_exhaustive()
    }
}
