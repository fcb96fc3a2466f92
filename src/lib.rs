//! Retcon: retroactive amendment of undo/redo histories
//!
//! Retcon is built on the "pure core, imperative shell" philosophy. Plain
//! undo tracking records one history entry per change and can only move
//! backward and forward along that line. Retcon adds a layer that lets a
//! caller mark a change as provisional, keep applying unrelated changes,
//! and later fold a correction into every entry recorded since, without
//! adding an undo step for the correction itself.
//!
//! # Core Concepts
//!
//! - **Snapshot**: One recorded value, compared by reference identity
//! - **Reducer**: The shared `(state, action) -> state` transition contract
//! - **Undoable**: Undo/redo history over a plain reducer
//! - **Amender**: BEGIN/END directives that rewrite past snapshots
//! - **Checkpoint**: Serializable form of an amended history
//!
//! # Example
//!
//! ```rust
//! use retcon::builder::AmenderBuilder;
//! use retcon::core::{Directed, Directive, Reducer};
//! use retcon::undo::{UndoAction, Undoable};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Edit {
//!     text: Option<&'static str>,
//!     op: Option<Directive<u32>>,
//! }
//!
//! impl Directed for Edit {
//!     type Id = u32;
//!
//!     fn directive(&self) -> Directive<u32> {
//!         self.op.clone().unwrap_or(Directive::Ordinary)
//!     }
//! }
//!
//! impl UndoAction for Edit {}
//!
//! let inner = Undoable::new("", |present: &Arc<&'static str>, edit: &Edit| {
//!     edit.text.map_or_else(|| Arc::clone(present), Arc::new)
//! });
//! let mut amender = AmenderBuilder::new(inner)
//!     .merge(|_present, _entry, _edit| Arc::new("merged"))
//!     .build();
//!
//! let begin = Edit { text: Some("p0"), op: Some(Directive::Begin(1)) };
//! let state = amender.reduce(None, &begin);
//! let state = amender.reduce(Some(&state), &Edit { text: Some("p1"), op: None });
//! let state = amender.reduce(Some(&state), &Edit { text: Some("p2"), op: None });
//!
//! let end = Edit { text: Some("p3"), op: Some(Directive::End(1)) };
//! let state = amender.reduce(Some(&state), &end);
//!
//! let past: Vec<&str> = state.past().iter().map(|s| **s).collect();
//! assert_eq!(past, vec!["", "merged", "merged"]);
//! ```

pub mod amend;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod store;
pub mod undo;

// Re-export commonly used types
pub use amend::{AmendedHistory, Amender};
pub use crate::core::{Directed, Directive, History, Merge, Reducer, Snapshot};
pub use undo::{UndoAction, UndoCommand, Undoable};
