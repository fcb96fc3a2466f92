//! Builder for history amenders.

use crate::amend::Amender;
use crate::core::{Directed, History, Merge, Reducer, Snapshot};

/// Builder for [`Amender`] with a fluent API.
pub struct AmenderBuilder<S, R>
where
    R: Reducer<State = History<S>>,
{
    inner: R,
    merge: Option<Merge<S, R::Action>>,
}

impl<S, R> AmenderBuilder<S, R>
where
    R: Reducer<State = History<S>>,
    R::Action: Directed + Default,
{
    /// Create a builder wrapping `inner` (required).
    pub fn new(inner: R) -> Self {
        Self { inner, merge: None }
    }

    /// Set the merge function (optional, defaults to identity).
    pub fn merge<F>(mut self, merge: F) -> Self
    where
        F: Fn(&Snapshot<S>, &Snapshot<S>, &R::Action) -> Snapshot<S> + Send + Sync + 'static,
    {
        self.merge = Some(Merge::new(merge));
        self
    }

    /// Build the amender.
    pub fn build(self) -> Amender<S, R> {
        Amender::with_merge(self.inner, self.merge.unwrap_or_default())
    }
}
