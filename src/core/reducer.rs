//! The state transition signature shared by every layer.

use std::sync::Arc;

/// A state transition function over shared state.
///
/// `state` is `None` when the container is being initialized. A reducer
/// that judges an action to change nothing must return the exact `Arc`
/// it was given; any change must produce a new `Arc`. Layers built on
/// top (and subscribers downstream) rely on `Arc::ptr_eq` to skip work.
///
/// Reducers take `&mut self` because layers may keep per-instance caches.
/// Callers must drive one reducer instance sequentially.
///
/// # Example
///
/// ```rust
/// use retcon::core::Reducer;
/// use std::sync::Arc;
///
/// struct Counter;
///
/// impl Reducer for Counter {
///     type State = i64;
///     type Action = i64;
///
///     fn reduce(&mut self, state: Option<&Arc<i64>>, delta: &i64) -> Arc<i64> {
///         match state {
///             Some(current) if *delta == 0 => Arc::clone(current),
///             Some(current) => Arc::new(**current + delta),
///             None => Arc::new(*delta),
///         }
///     }
/// }
///
/// let mut counter = Counter;
/// let start = counter.reduce(None, &5);
/// let same = counter.reduce(Some(&start), &0);
/// assert!(Arc::ptr_eq(&start, &same));
/// ```
pub trait Reducer {
    type State;
    type Action;

    fn reduce(&mut self, state: Option<&Arc<Self::State>>, action: &Self::Action)
        -> Arc<Self::State>;
}

impl<R: Reducer + ?Sized> Reducer for Box<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(
        &mut self,
        state: Option<&Arc<Self::State>>,
        action: &Self::Action,
    ) -> Arc<Self::State> {
        (**self).reduce(state, action)
    }
}
