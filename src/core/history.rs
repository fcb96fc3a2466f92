//! Undo/redo history values.
//!
//! A [`History`] is an immutable `past`/`present`/`future` triple of
//! snapshots. Every operation returns a new history; snapshots are moved
//! between the three regions by reference, never cloned by value, so the
//! identity of a snapshot survives undo and redo.

use std::sync::Arc;

/// One recorded value of application state.
///
/// Snapshots are compared by reference identity (`Arc::ptr_eq`), never by
/// value. Two snapshots holding equal values are still distinct points in
/// time.
pub type Snapshot<S> = Arc<S>;

/// Ordered undo/redo history.
///
/// `past` runs oldest to newest, `future` runs nearest to farthest.
///
/// # Example
///
/// ```rust
/// use retcon::core::History;
/// use std::sync::Arc;
///
/// let history = History::new(1);
/// let history = history.record(Arc::new(2), None);
/// let history = history.record(Arc::new(3), None);
///
/// assert_eq!(history.past().len(), 2);
/// assert_eq!(**history.present(), 3);
///
/// let undone = history.undo().unwrap();
/// assert_eq!(**undone.present(), 2);
/// assert_eq!(undone.future().len(), 1);
/// ```
#[derive(Debug)]
pub struct History<S> {
    past: Vec<Snapshot<S>>,
    present: Snapshot<S>,
    future: Vec<Snapshot<S>>,
}

impl<S> Clone for History<S> {
    fn clone(&self) -> Self {
        Self {
            past: self.past.clone(),
            present: Arc::clone(&self.present),
            future: self.future.clone(),
        }
    }
}

impl<S> History<S> {
    /// Create a history with no past and no future.
    pub fn new(initial: S) -> Self {
        Self::from_present(Arc::new(initial))
    }

    /// Create a history around an existing snapshot.
    pub fn from_present(present: Snapshot<S>) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
        }
    }

    /// Assemble a history from its three regions.
    pub fn from_parts(past: Vec<Snapshot<S>>, present: Snapshot<S>, future: Vec<Snapshot<S>>) -> Self {
        Self {
            past,
            present,
            future,
        }
    }

    pub fn past(&self) -> &[Snapshot<S>] {
        &self.past
    }

    pub fn present(&self) -> &Snapshot<S> {
        &self.present
    }

    pub fn future(&self) -> &[Snapshot<S>] {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Record a new present, returning a new history.
    ///
    /// The old present is appended to `past` and `future` is discarded.
    /// With a `limit`, the oldest past entries are dropped so that at most
    /// `limit` remain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retcon::core::History;
    /// use std::sync::Arc;
    ///
    /// let history = History::new("a");
    /// let next = history.record(Arc::new("b"), None);
    ///
    /// assert_eq!(next.past().len(), 1);
    /// assert_eq!(history.past().len(), 0); // Original unchanged
    /// ```
    pub fn record(&self, next: Snapshot<S>, limit: Option<usize>) -> Self {
        let mut past = self.past.clone();
        past.push(Arc::clone(&self.present));
        if let Some(limit) = limit {
            let excess = past.len().saturating_sub(limit);
            past.drain(..excess);
        }
        Self {
            past,
            present: next,
            future: Vec::new(),
        }
    }

    /// Replace the present without creating a history entry.
    pub fn replace_present(&self, present: Snapshot<S>) -> Self {
        Self {
            past: self.past.clone(),
            present,
            future: self.future.clone(),
        }
    }

    /// Replace `past`, keeping present and future.
    pub fn with_past(&self, past: Vec<Snapshot<S>>) -> Self {
        Self {
            past,
            present: Arc::clone(&self.present),
            future: self.future.clone(),
        }
    }

    /// Step one entry back. Returns `None` when there is nothing to undo.
    pub fn undo(&self) -> Option<Self> {
        let (last, rest) = self.past.split_last()?;
        let mut future = Vec::with_capacity(self.future.len() + 1);
        future.push(Arc::clone(&self.present));
        future.extend(self.future.iter().cloned());
        Some(Self {
            past: rest.to_vec(),
            present: Arc::clone(last),
            future,
        })
    }

    /// Step one entry forward. Returns `None` when there is nothing to redo.
    pub fn redo(&self) -> Option<Self> {
        let (next, rest) = self.future.split_first()?;
        let mut past = self.past.clone();
        past.push(Arc::clone(&self.present));
        Some(Self {
            past,
            present: Arc::clone(next),
            future: rest.to_vec(),
        })
    }

    /// Move `steps` entries through history: negative undoes, positive redoes.
    ///
    /// Returns `None` for zero steps or when the target lies outside the
    /// recorded history.
    pub fn jump(&self, steps: isize) -> Option<Self> {
        if steps == 0 {
            return None;
        }
        let distance = steps.unsigned_abs();
        if steps < 0 {
            let split = self.past.len().checked_sub(distance)?;
            let mut future: Vec<Snapshot<S>> = self.past[split + 1..].to_vec();
            future.push(Arc::clone(&self.present));
            future.extend(self.future.iter().cloned());
            Some(Self {
                past: self.past[..split].to_vec(),
                present: Arc::clone(&self.past[split]),
                future,
            })
        } else {
            if distance > self.future.len() {
                return None;
            }
            let mut past = self.past.clone();
            past.push(Arc::clone(&self.present));
            past.extend(self.future[..distance - 1].iter().cloned());
            Some(Self {
                past,
                present: Arc::clone(&self.future[distance - 1]),
                future: self.future[distance..].to_vec(),
            })
        }
    }

    /// Drop past and future, keeping the present.
    pub fn cleared(&self) -> Self {
        Self::from_present(Arc::clone(&self.present))
    }
}
