//! Amendment directives carried by actions.

use std::fmt::Debug;
use std::hash::Hash;

/// Control directive attached to an action.
///
/// `Begin` marks the start of a provisional operation and `End` folds
/// the operation back into every history entry recorded since.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Directive<Id> {
    /// Ordinary action, no amendment bookkeeping
    Ordinary,

    /// Capture the present under `Id`
    Begin(Id),

    /// Amend history back to the snapshot captured for `Id`
    End(Id),
}

impl<Id> Directive<Id> {
    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::Ordinary => None,
            Self::Begin(id) | Self::End(id) => Some(id),
        }
    }
}

/// Actions that may carry an amendment [`Directive`].
///
/// The amender reads the directive and nothing else; the rest of the
/// action is passed verbatim to the wrapped reducer and the merge
/// function.
///
/// # Example
///
/// ```rust
/// use retcon::core::{Directed, Directive};
///
/// #[derive(Default)]
/// struct Edit {
///     text: String,
///     op: Option<Directive<u64>>,
/// }
///
/// impl Directed for Edit {
///     type Id = u64;
///
///     fn directive(&self) -> Directive<u64> {
///         self.op.clone().unwrap_or(Directive::Ordinary)
///     }
/// }
///
/// let edit = Edit { text: "hi".into(), op: Some(Directive::Begin(1)) };
/// assert_eq!(edit.directive(), Directive::Begin(1));
/// assert_eq!(Edit::default().directive(), Directive::Ordinary);
/// ```
pub trait Directed {
    /// Caller-chosen token identifying one BEGIN...END operation.
    type Id: Clone + Eq + Hash + Debug;

    /// The directive carried by this action.
    ///
    /// Default implementation returns [`Directive::Ordinary`].
    fn directive(&self) -> Directive<Self::Id> {
        Directive::Ordinary
    }
}
